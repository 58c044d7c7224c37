use std::cmp::Ordering;
use std::path::Path;

use serde_json::{Map, Value};

use super::{ContentApi, Query, sanity_image_url};
use crate::content::ImageRef;
use crate::errors::{ConfigError, ContentError};

/// Answers queries from a fixed set of post documents held in memory.
///
/// Documents use the same JSON shape the remote store returns, with references already resolved
/// (`author: { name, image }`, `categories: [{ title }]`).
pub struct MemoryContent {
    documents: Vec<Value>,
    project_id: String,
    dataset: String,
}

impl MemoryContent {
    pub fn new(documents: Vec<Value>) -> Self {
        Self {
            documents,
            project_id: "memory".to_string(),
            dataset: "fixtures".to_string(),
        }
    }

    /// Loads documents from a JSON file containing an array of posts.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let documents: Vec<Value> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::InvalidFixtures {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::new(documents))
    }

    /// Resolve image references against this project and dataset instead of the placeholder ones.
    pub fn with_project(mut self, project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self.dataset = dataset.into();
        self
    }

    fn newest_first(&self) -> Vec<&Value> {
        let mut documents: Vec<&Value> = self.documents.iter().collect();
        documents.sort_by(|a, b| compare_published(b, a));
        documents
    }
}

fn id_of(document: &Value) -> Option<&str> {
    document.get("_id").and_then(Value::as_str)
}

// ISO 8601 timestamps order lexicographically. Undated posts go last.
fn compare_published(a: &Value, b: &Value) -> Ordering {
    let published = |document: &Value| document.get("publishedAt").and_then(Value::as_str).map(str::to_owned);
    published(a).cmp(&published(b))
}

fn project(document: &Value, fields: &[&str]) -> Value {
    let mut projected = Map::new();
    for field in fields {
        let value = document.get(*field).cloned().unwrap_or(Value::Null);
        projected.insert(field.to_string(), value);
    }
    Value::Object(projected)
}

impl ContentApi for MemoryContent {
    fn fetch(&self, query: &Query) -> Result<Value, ContentError> {
        let result = match query {
            Query::AllEntries => Value::Array(self.newest_first().into_iter().cloned().collect()),
            Query::EntryById { id } => self
                .documents
                .iter()
                .find(|document| id_of(document) == Some(id.as_str()))
                .cloned()
                .unwrap_or(Value::Null),
            Query::RelatedEntries { exclude, limit } => Value::Array(
                self.newest_first()
                    .into_iter()
                    .filter(|document| id_of(document) != Some(exclude.as_str()))
                    .take(*limit)
                    .map(|document| project(document, &["_id", "title", "mainImage", "publishedAt"]))
                    .collect(),
            ),
        };

        Ok(result)
    }

    fn image_url(&self, image: &ImageRef) -> Option<String> {
        sanity_image_url(&self.project_id, &self.dataset, image)
    }
}
