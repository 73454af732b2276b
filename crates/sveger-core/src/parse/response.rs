use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::MediaType;
use super::schema::Schema;

/// A response definition. OpenAPI 3 fills `content`, Swagger 2 fills `schema`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Response {
    /// Every schema attached to this response, media types first.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.content
            .values()
            .filter_map(|mt| mt.schema.as_ref())
            .chain(self.schema.as_ref())
    }
}
