pub mod model;
pub mod operations;
pub mod types;

pub use model::{ApiInfo, AuthMode, ClientModel, ConnectionConfig, Resource};
pub use operations::*;
pub use types::*;
