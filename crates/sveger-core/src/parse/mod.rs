pub mod components;
pub mod document;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod reference;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod server;

use std::fs;
use std::path::Path;

use crate::error::LoadError;
pub use document::{Dialect, Document, Info, SchemaMap};

/// Serialization of the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.json` (any case) is JSON; everything else is treated as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Parse raw bytes into a [`Document`].
pub fn load(input: &[u8], format: Format) -> Result<Document, LoadError> {
    let doc = match format {
        Format::Json => document::from_raw_json(input)?,
        Format::Yaml => document::from_raw_yaml(input)?,
    };
    log::debug!(
        "loaded {:?} {} document: {} paths, {} schemas",
        doc.dialect,
        doc.version,
        doc.paths.len(),
        doc.schemas.len()
    );
    Ok(doc)
}

/// Read and parse a file, choosing the format from its extension.
pub fn load_path(path: &Path) -> Result<Document, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load(&bytes, Format::from_path(path))
}

/// Parse a document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, LoadError> {
    load(input.as_bytes(), Format::Yaml)
}

/// Parse a document from JSON.
pub fn from_json(input: &str) -> Result<Document, LoadError> {
    load(input.as_bytes(), Format::Json)
}
