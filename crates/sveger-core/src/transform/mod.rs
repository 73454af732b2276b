pub mod model_builder;
pub mod name_normalizer;
pub mod operation_classifier;
pub mod partitioner;
pub mod reference_graph;
pub mod return_type;
pub mod schema_resolver;

pub use model_builder::{ModelOptions, build_model};
pub use return_type::InferenceOptions;
