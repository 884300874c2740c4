//! Property handler
//!
//! The per-node bag of `name -> DynamicValue` pairs that sits between a
//! strongly typed node and its serialized record. A handler is created for a
//! single load or store and dropped once the node is materialized or
//! captured.

use nodal_value::json::{from_json, to_json};
use nodal_value::{DynamicValue, ValueMap};
use serde_json::{Map, Value as JsonValue};

use crate::error::{LoaderError, Result};
use crate::property::{NodeProperty, PropertyDescriptor, PropertyValue};
use crate::record::NodeRecord;

/// Serialized state of one node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyHandler {
    class_name: String,
    properties: ValueMap,
}

impl PropertyHandler {
    /// Create an empty handler for a node kind
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            properties: ValueMap::new(),
        }
    }

    /// Create a handler from an existing property map
    pub fn with_properties(class_name: impl Into<String>, properties: ValueMap) -> Self {
        Self {
            class_name: class_name.into(),
            properties,
        }
    }

    /// Build a handler from external JSON properties.
    ///
    /// Entries with no dynamic counterpart are dropped and reported; the rest
    /// of the handler is still usable.
    pub fn from_json_properties(
        class_name: impl Into<String>,
        properties: &Map<String, JsonValue>,
    ) -> (Self, Vec<LoaderError>) {
        let mut handler = Self::new(class_name);
        let mut issues = Vec::new();
        for (name, json) in properties {
            match from_json(json) {
                Ok(value) => {
                    handler.properties.insert(name.clone(), value);
                }
                Err(source) => issues.push(LoaderError::property_mismatch(name.as_str(), source)),
            }
        }
        (handler, issues)
    }

    /// Build a handler from a scene record's class name and properties
    pub fn from_record(record: &NodeRecord) -> (Self, Vec<LoaderError>) {
        Self::from_json_properties(record.class_name.as_str(), &record.properties)
    }

    /// Convert the properties into an external JSON object
    pub fn to_json_properties(&self) -> Result<Map<String, JsonValue>> {
        self.properties
            .iter()
            .map(|(name, value)| {
                to_json(value)
                    .map(|json| (name.clone(), json))
                    .map_err(|source| LoaderError::Unrepresentable {
                        property: name.clone(),
                        source,
                    })
            })
            .collect()
    }

    /// Class name of the node this handler describes
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.class_name = class_name.into();
    }

    /// Get a stored property
    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        self.properties.get(name)
    }

    /// Insert or overwrite a property, returning the previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<DynamicValue>) -> Option<DynamicValue> {
        self.properties.insert(name.into(), value.into())
    }

    /// Check if a property is stored
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Remove a property
    pub fn remove(&mut self, name: &str) -> Option<DynamicValue> {
        self.properties.remove(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate over stored properties
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DynamicValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn properties(&self) -> &ValueMap {
        &self.properties
    }

    pub fn into_properties(self) -> ValueMap {
        self.properties
    }

    // ========== Descriptor application ==========

    /// Apply one stored property to a node.
    ///
    /// Returns `Ok(false)` and leaves the node untouched when the key is
    /// absent. A stored value of the wrong shape is a
    /// [`LoaderError::PropertyTypeMismatch`]; the node is left untouched.
    pub fn load<N, T: PropertyValue>(
        &self,
        descriptor: &PropertyDescriptor<N, T>,
        node: &mut N,
    ) -> Result<bool> {
        let Some(value) = self.properties.get(descriptor.name()) else {
            return Ok(false);
        };
        let converted = T::from_value(value)
            .map_err(|source| LoaderError::property_mismatch(descriptor.name(), source))?;
        descriptor.write(node, converted);
        Ok(true)
    }

    /// Capture one property from a node, overwriting any previous entry
    pub fn store<N, T: PropertyValue>(&mut self, descriptor: &PropertyDescriptor<N, T>, node: &N) {
        let value = descriptor.read(node).to_value();
        self.properties.insert(descriptor.name().to_string(), value);
    }

    /// Apply every listed property in order, collecting per-property failures
    pub fn load_all<N>(&self, properties: &[&dyn NodeProperty<N>], node: &mut N) -> Vec<LoaderError> {
        let mut issues = Vec::new();
        for property in properties {
            if let Err(e) = property.load(self, node) {
                log::warn!("Skipping property '{}' on '{}': {}", property.name(), self.class_name, e);
                issues.push(e);
            }
        }
        issues
    }

    /// Capture every listed property in order
    pub fn store_all<N>(&mut self, properties: &[&dyn NodeProperty<N>], node: &N) {
        for property in properties {
            property.store(node, self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyHelper;
    use nodal_value::ValueError;
    use serde_json::json;

    #[derive(Default)]
    struct Lamp {
        on: bool,
        watts: i32,
    }

    const ON: PropertyDescriptor<Lamp, bool> =
        PropertyHelper::<Lamp>::make("on", |lamp| lamp.on, |lamp, value| lamp.on = value);
    const WATTS: PropertyDescriptor<Lamp, i32> =
        PropertyHelper::<Lamp>::make("watts", |lamp| lamp.watts, |lamp, value| lamp.watts = value);
    const LAMP_PROPERTIES: &[&dyn NodeProperty<Lamp>] = &[&ON, &WATTS];

    #[test]
    fn test_missing_key_keeps_default() {
        let handler = PropertyHandler::new("Lamp");
        let mut lamp = Lamp { on: true, watts: 60 };
        assert!(!handler.load(&ON, &mut lamp).unwrap());
        assert!(lamp.on);
    }

    #[test]
    fn test_wrong_tag_is_property_mismatch() {
        let mut handler = PropertyHandler::new("Lamp");
        handler.set("on", "yes");
        let mut lamp = Lamp::default();
        let err = handler.load(&ON, &mut lamp).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::PropertyTypeMismatch { ref property, source: ValueError::TypeMismatch { .. } }
                if property == "on"
        ));
        assert!(!lamp.on);
    }

    #[test]
    fn test_load_all_continues_after_failure() {
        let mut handler = PropertyHandler::new("Lamp");
        handler.set("on", 1);
        handler.set("watts", 40);
        let mut lamp = Lamp::default();

        let issues = handler.load_all(LAMP_PROPERTIES, &mut lamp);
        assert_eq!(issues.len(), 1);
        assert!(!lamp.on);
        assert_eq!(lamp.watts, 40);
    }

    #[test]
    fn test_store_overwrites() {
        let mut handler = PropertyHandler::new("Lamp");
        handler.set("watts", "stale");
        handler.store_all(LAMP_PROPERTIES, &Lamp { on: true, watts: 75 });

        assert_eq!(handler.get("on"), Some(&DynamicValue::Bool(true)));
        assert_eq!(handler.get("watts"), Some(&DynamicValue::Int(75)));
        assert_eq!(handler.len(), 2);
    }

    #[test]
    fn test_json_properties() {
        let object = json!({ "on": true, "watts": 60, "huge": u64::MAX });
        let (handler, issues) =
            PropertyHandler::from_json_properties("Lamp", object.as_object().unwrap());
        assert_eq!(issues.len(), 1);
        assert!(!handler.contains("huge"));
        assert_eq!(handler.get("watts"), Some(&DynamicValue::Int(60)));

        let back = handler.to_json_properties().unwrap();
        assert_eq!(back.get("on"), Some(&json!(true)));

        let mut broken = PropertyHandler::new("Lamp");
        broken.set("level", f32::NAN);
        assert!(matches!(
            broken.to_json_properties(),
            Err(LoaderError::Unrepresentable { .. })
        ));
    }
}
