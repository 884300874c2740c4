//! Scene records
//!
//! The external, serde-facing shape of a scene graph: one record per node
//! holding its class name, its properties as a JSON object and its child
//! records in order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;

/// Serialized form of one node and its subtree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Registered class name of the node kind
    pub class_name: String,
    /// Property values keyed by property name
    #[serde(default)]
    pub properties: Map<String, JsonValue>,
    /// Child records in child order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    /// Create a record with no properties or children
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            properties: Map::new(),
            children: Vec::new(),
        }
    }

    /// Build a record from a captured handler
    pub fn from_handler(handler: &PropertyHandler) -> Result<Self> {
        Ok(Self {
            class_name: handler.class_name().to_string(),
            properties: handler.to_json_properties()?,
            children: Vec::new(),
        })
    }

    /// Set a property, builder style
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Append a child record, builder style
    pub fn with_child(mut self, child: NodeRecord) -> Self {
        self.children.push(child);
        self
    }

    /// Number of records in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(NodeRecord::subtree_len).sum::<usize>()
    }
}

/// Scene file envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Format version the file was written with
    #[serde(default = "SceneDocument::current_version")]
    pub version: u32,
    /// Root node record
    pub root: NodeRecord,
}

impl SceneDocument {
    /// Newest format version this crate reads and the one it writes
    pub const CURRENT_VERSION: u32 = 1;

    fn current_version() -> u32 {
        Self::CURRENT_VERSION
    }

    /// Wrap a root record at the current version
    pub fn new(root: NodeRecord) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            root,
        }
    }

    /// Parse a document from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(text)?;
        document.check_version()?;
        Ok(document)
    }

    /// Render the document as JSON text
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Reject documents written by a newer format version
    pub fn check_version(&self) -> Result<()> {
        if self.version > Self::CURRENT_VERSION {
            return Err(LoaderError::UnsupportedVersion {
                found: self.version,
                supported: Self::CURRENT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_defaults_when_absent() {
        let record: NodeRecord = serde_json::from_value(json!({ "class_name": "Sprite" })).unwrap();
        assert_eq!(record.class_name, "Sprite");
        assert!(record.properties.is_empty());
        assert!(record.children.is_empty());
    }

    #[test]
    fn test_children_omitted_when_empty() {
        let record = NodeRecord::new("Node").with_property("name", "root");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("children").is_none());
        assert_eq!(json["properties"]["name"], json!("root"));
    }

    #[test]
    fn test_subtree_len() {
        let record = NodeRecord::new("Node")
            .with_child(NodeRecord::new("Sprite"))
            .with_child(NodeRecord::new("Layout").with_child(NodeRecord::new("Sprite")));
        assert_eq!(record.subtree_len(), 4);
    }

    #[test]
    fn test_document_version() {
        let document = SceneDocument::from_json_str(r#"{ "root": { "class_name": "Node" } }"#).unwrap();
        assert_eq!(document.version, SceneDocument::CURRENT_VERSION);

        let err = SceneDocument::from_json_str(r#"{ "version": 99, "root": { "class_name": "Node" } }"#)
            .unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedVersion { found: 99, supported: 1 }));

        assert!(matches!(
            SceneDocument::from_json_str("{ not json"),
            Err(LoaderError::Json(_))
        ));
    }

    #[test]
    fn test_handler_to_record() {
        let mut handler = PropertyHandler::new("Sprite");
        handler.set("flipped_x", true);
        let record = NodeRecord::from_handler(&handler).unwrap();
        assert_eq!(record.class_name, "Sprite");
        assert_eq!(record.properties.get("flipped_x"), Some(&json!(true)));

        let (back, issues) = PropertyHandler::from_record(&record);
        assert!(issues.is_empty());
        assert_eq!(back, handler);
    }
}
