//! Placeholder for records whose class name is not registered
//!
//! A placeholder loads the base node properties it understands and keeps
//! the original class name and raw properties, so writing it back yields
//! the record it came from.

use std::any::Any;
use std::collections::BTreeSet;

use nodal_scene::{Node, NodeBase};
use serde_json::{Map, Value as JsonValue};

use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;
use crate::loader::NodeLoader;
use crate::loaders::BaseNodeLoader;
use crate::record::NodeRecord;

/// A node standing in for an unregistered kind
#[derive(Debug)]
pub struct UnknownNode {
    base: NodeBase,
    class_name: String,
    properties: Map<String, JsonValue>,
    /// Raw entries the base properties could not take; written back untouched
    preserved: BTreeSet<String>,
}

impl UnknownNode {
    /// Build a placeholder for `record`, loading the base properties from
    /// `handler`. Returns the per-property failures.
    pub fn load(record: &NodeRecord, handler: &PropertyHandler) -> Result<(Self, Vec<LoaderError>)> {
        let mut node = Self {
            base: NodeBase::new(),
            class_name: record.class_name.clone(),
            properties: record.properties.clone(),
            preserved: BTreeSet::new(),
        };
        let issues = BaseNodeLoader.load_properties(&mut node, handler)?;

        node.preserved = record
            .properties
            .keys()
            .filter(|name| !handler.contains(name.as_str()))
            .cloned()
            .collect();
        node.preserved
            .extend(issues.iter().filter_map(LoaderError::property_name).map(str::to_string));
        Ok((node, issues))
    }

    /// Class name of the original record
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Raw properties of the original record
    pub fn properties(&self) -> &Map<String, JsonValue> {
        &self.properties
    }

    /// Record under the original class name. Base properties that loaded are
    /// refreshed from the node; every other raw entry is kept as read.
    pub fn to_record(&self) -> Result<NodeRecord> {
        let mut handler = PropertyHandler::new(self.class_name.as_str());
        BaseNodeLoader.store_properties(self, &mut handler)?;

        let mut properties = self.properties.clone();
        for (name, value) in handler.to_json_properties()? {
            if !self.preserved.contains(&name) {
                properties.insert(name, value);
            }
        }
        Ok(NodeRecord {
            class_name: self.class_name.clone(),
            properties,
            children: Vec::new(),
        })
    }
}

impl Node for UnknownNode {
    fn kind_name(&self) -> &'static str {
        "UnknownNode"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mystery() -> NodeRecord {
        NodeRecord::new("Mystery")
            .with_property("name", "odd")
            .with_property("power", 9)
            .with_property("tag", json!("not a number"))
            .with_property("huge", json!(u64::MAX))
    }

    #[test]
    fn test_load_keeps_raw_record() {
        let record = mystery();
        let (handler, _) = PropertyHandler::from_record(&record);
        let (node, issues) = UnknownNode::load(&record, &handler).unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(node.base().name(), "odd");
        assert_eq!(node.base().tag(), NodeBase::INVALID_TAG);
        assert_eq!(node.class_name(), "Mystery");
        assert_eq!(node.properties()["power"], json!(9));
    }

    #[test]
    fn test_write_back_preserves_unknown_entries() {
        let record = mystery();
        let (handler, _) = PropertyHandler::from_record(&record);
        let (mut node, _) = UnknownNode::load(&record, &handler).unwrap();
        node.base_mut().set_name("renamed");

        let written = node.to_record().unwrap();
        assert_eq!(written.class_name, "Mystery");
        assert_eq!(written.properties["power"], json!(9));
        assert_eq!(written.properties["tag"], json!("not a number"));
        assert_eq!(written.properties["huge"], json!(u64::MAX));
        assert_eq!(written.properties["name"], json!("renamed"));
        assert_eq!(written.properties["visible"], json!(true));
    }
}
