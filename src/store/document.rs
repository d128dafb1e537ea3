//! Collection addressing, document payloads and batched writes

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::store_errors::StoreError;

/// Path to a collection, either a root collection (`clients`) or a
/// subcollection scoped to a parent document (`clients/{id}/payments`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Root collection
    pub fn root(name: &str) -> Self {
        Self {
            segments: vec![name.to_string()],
        }
    }

    /// Subcollection of one document in this collection
    pub fn child(&self, doc_id: &str, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(doc_id.to_string());
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Percent-encoded URI form, safe to embed in a URL path
    pub fn to_uri(&self) -> String {
        self.segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// A stored document: an id plus a JSON object of fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Deserializes the document fields into a typed model
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.data.clone()).map_err(|e| {
            StoreError::InvalidData(format!("document {}: {}", self.id, e))
        })
    }
}

/// Single-field equality filter; compound queries pass several
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when the document's top-level field equals the filter value
    pub fn matches(&self, data: &Value) -> bool {
        data.get(&self.field) == Some(&self.value)
    }
}

/// One operation inside a batch write
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Create or fully replace a document
    Set {
        path: CollectionPath,
        id: String,
        data: Value,
    },
    /// Merge top-level fields into an existing document
    Update {
        path: CollectionPath,
        id: String,
        patch: Value,
    },
}

/// An atomic multi-document write: all operations apply or none do
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: CollectionPath, id: impl Into<String>, data: Value) -> &mut Self {
        self.ops.push(WriteOp::Set {
            path,
            id: id.into(),
            data,
        });
        self
    }

    pub fn update(
        &mut self,
        path: CollectionPath,
        id: impl Into<String>,
        patch: Value,
    ) -> &mut Self {
        self.ops.push(WriteOp::Update {
            path,
            id: id.into(),
            patch,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subcollection_path_display_and_uri() {
        let path = CollectionPath::root("clients").child("c 1", "payments");
        assert_eq!(path.to_string(), "clients/c 1/payments");
        assert_eq!(path.to_uri(), "clients/c%201/payments");
    }

    #[test]
    fn filter_matches_top_level_field_only() {
        let filter = Filter::eq("type", "omra");
        assert!(filter.matches(&json!({"type": "omra", "date": "2024-03-01"})));
        assert!(!filter.matches(&json!({"type": "hajj"})));
        assert!(!filter.matches(&json!({"nested": {"type": "omra"}})));
    }
}
