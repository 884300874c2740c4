//! Dynamic value types
//!
//! A tagged union over the primitive and container shapes a node property
//! can take once it leaves its strongly typed owner.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, ValueError};

/// Ordered sequence of values
pub type ValueList = Vec<DynamicValue>;

/// Keyed mapping of values. Keys are unique; ordering carries no meaning.
pub type ValueMap = BTreeMap<String, DynamicValue>;

/// The tag of a [`DynamicValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    None,
    Bool,
    Int,
    Float,
    String,
    List,
    Map,
}

impl ValueType {
    /// Lowercase name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::List => "list",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed value
#[derive(Debug, Clone, Default)]
pub enum DynamicValue {
    /// No value
    #[default]
    None,
    /// Boolean
    Bool(bool),
    /// Integer (64-bit signed)
    Int(i64),
    /// Float (32-bit)
    Float(f32),
    /// String
    String(String),
    /// Ordered list of values
    List(ValueList),
    /// Map from string key to value
    Map(ValueMap),
}

impl DynamicValue {
    /// Create an empty list
    pub fn list() -> Self {
        Self::List(ValueList::new())
    }

    /// Create an empty map
    pub fn map() -> Self {
        Self::Map(ValueMap::new())
    }

    /// Get the active tag
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::None => ValueType::None,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::String(_) => ValueType::String,
            Self::List(_) => ValueType::List,
            Self::Map(_) => ValueType::Map,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Move the value out, leaving `None` in its place
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Reset to `None`, dropping any nested contents
    pub fn clear(&mut self) {
        *self = Self::None;
    }

    // ========== Optional accessors ==========

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&ValueList> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Try to get as map
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    // ========== Checked accessors ==========

    /// Get as bool or fail with a type mismatch
    pub fn try_bool(&self) -> Result<bool> {
        self.as_bool().ok_or_else(|| self.mismatch(ValueType::Bool))
    }

    /// Get as integer or fail with a type mismatch
    pub fn try_int(&self) -> Result<i64> {
        self.as_int().ok_or_else(|| self.mismatch(ValueType::Int))
    }

    /// Get as float or fail with a type mismatch
    pub fn try_float(&self) -> Result<f32> {
        self.as_float().ok_or_else(|| self.mismatch(ValueType::Float))
    }

    /// Get as string or fail with a type mismatch
    pub fn try_str(&self) -> Result<&str> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    /// Get as list or fail with a type mismatch
    pub fn try_list(&self) -> Result<&ValueList> {
        match self {
            Self::List(l) => Ok(l),
            _ => Err(self.mismatch(ValueType::List)),
        }
    }

    /// Get as mutable list or fail with a type mismatch
    pub fn try_list_mut(&mut self) -> Result<&mut ValueList> {
        match self {
            Self::List(l) => Ok(l),
            other => Err(ValueError::type_mismatch(ValueType::List, other.value_type())),
        }
    }

    /// Get as map or fail with a type mismatch
    pub fn try_map(&self) -> Result<&ValueMap> {
        match self {
            Self::Map(m) => Ok(m),
            _ => Err(self.mismatch(ValueType::Map)),
        }
    }

    /// Get as mutable map or fail with a type mismatch
    pub fn try_map_mut(&mut self) -> Result<&mut ValueMap> {
        match self {
            Self::Map(m) => Ok(m),
            other => Err(ValueError::type_mismatch(ValueType::Map, other.value_type())),
        }
    }

    fn mismatch(&self, expected: ValueType) -> ValueError {
        ValueError::type_mismatch(expected, self.value_type())
    }

    // ========== Container helpers ==========

    /// Get a field from a map value
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.as_map()?.get(key)
    }

    /// Get a required field from a map value
    pub fn field(&self, key: &str) -> Result<&DynamicValue> {
        self.try_map()?
            .get(key)
            .ok_or_else(|| ValueError::MissingField(key.to_string()))
    }

    /// Insert a field into a map value, returning the previous entry
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DynamicValue>) -> Result<Option<DynamicValue>> {
        Ok(self.try_map_mut()?.insert(key.into(), value.into()))
    }

    /// Append an element to a list value
    pub fn push(&mut self, value: impl Into<DynamicValue>) -> Result<()> {
        self.try_list_mut()?.push(value.into());
        Ok(())
    }

    /// Number of elements of a list or map, zero for everything else
    pub fn len(&self) -> usize {
        match self {
            Self::List(l) => l.len(),
            Self::Map(m) => m.len(),
            _ => 0,
        }
    }

    /// True for `None` and for empty containers
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::List(l) => l.is_empty(),
            Self::Map(m) => m.is_empty(),
            _ => false,
        }
    }
}

/// Structural equality.
///
/// Floats compare within `f32::EPSILON` (absolute, whatever the magnitude).
/// Values with different tags are never equal, so `Int(1) != Float(1.0)`.
impl PartialEq for DynamicValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => (a - b).abs() <= f32::EPSILON,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::String(s) => write!(f, "{:?}", s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for DynamicValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for DynamicValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for DynamicValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<ValueList> for DynamicValue {
    fn from(v: ValueList) -> Self {
        Self::List(v)
    }
}

impl From<ValueMap> for DynamicValue {
    fn from(v: ValueMap) -> Self {
        Self::Map(v)
    }
}

impl<V: Into<DynamicValue>> FromIterator<V> for DynamicValue {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

impl DynamicValue {
    /// Build a map value from `(key, value)` pairs
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<DynamicValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DynamicValue {
        DynamicValue::from_entries([
            ("name", DynamicValue::from("hero")),
            ("size", DynamicValue::from_entries([("width", 32.0f32), ("height", 48.0f32)])),
            ("tags", vec![DynamicValue::from(1), DynamicValue::from(2)].into()),
        ])
    }

    #[test]
    fn test_value_types() {
        assert_eq!(DynamicValue::default().value_type(), ValueType::None);
        assert_eq!(DynamicValue::from(true).value_type(), ValueType::Bool);
        assert_eq!(DynamicValue::from(42).value_type(), ValueType::Int);
        assert_eq!(DynamicValue::from(1.5f32).value_type(), ValueType::Float);
        assert_eq!(DynamicValue::from("x").value_type(), ValueType::String);
        assert_eq!(DynamicValue::list().value_type(), ValueType::List);
        assert_eq!(DynamicValue::map().value_type(), ValueType::Map);
    }

    #[test]
    fn test_checked_accessors() {
        let value = DynamicValue::from(7);
        assert_eq!(value.try_int(), Ok(7));
        assert_eq!(
            value.try_bool(),
            Err(ValueError::type_mismatch(ValueType::Bool, ValueType::Int))
        );
        assert!(value.try_str().is_err());
        assert!(value.as_float().is_none());
    }

    #[test]
    fn test_equality_is_reflexive() {
        let values = [
            DynamicValue::None,
            DynamicValue::from(false),
            DynamicValue::from(-3),
            DynamicValue::from(0.25f32),
            DynamicValue::from("text"),
            sample_tree(),
        ];
        for value in &values {
            assert_eq!(value, value);
            assert_eq!(&value.clone(), value);
        }
    }

    #[test]
    fn test_float_tolerance() {
        let a = DynamicValue::from(1.0f32);
        let b = DynamicValue::from(1.0f32 + f32::EPSILON / 2.0);
        let c = DynamicValue::from(1.001f32);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(DynamicValue::from(f32::NAN), DynamicValue::from(f32::NAN));
    }

    #[test]
    fn test_different_tags_never_equal() {
        assert_ne!(DynamicValue::from(1), DynamicValue::from(1.0f32));
        assert_ne!(DynamicValue::from(0), DynamicValue::from(false));
        assert_ne!(DynamicValue::None, DynamicValue::list());
        assert_ne!(DynamicValue::list(), DynamicValue::map());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = sample_tree();
        let mut copy = original.clone();

        copy.insert("name", "villain").unwrap();
        if let DynamicValue::Map(entries) = &mut copy {
            entries.get_mut("tags").unwrap().push(3).unwrap();
        }

        assert_eq!(original.get("name"), Some(&DynamicValue::from("hero")));
        assert_eq!(original.get("tags").map(DynamicValue::len), Some(2));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_take_leaves_none() {
        let mut slot = sample_tree();
        let moved = slot.take();
        assert!(slot.is_none());
        assert_eq!(moved, sample_tree());
    }

    #[test]
    fn test_map_helpers() {
        let mut value = DynamicValue::map();
        assert_eq!(value.insert("a", 1).unwrap(), None);
        assert_eq!(value.insert("a", 2).unwrap(), Some(DynamicValue::from(1)));
        assert_eq!(value.len(), 1);
        assert_eq!(value.field("a"), Ok(&DynamicValue::from(2)));
        assert_eq!(value.field("b"), Err(ValueError::MissingField("b".into())));

        let mut scalar = DynamicValue::from(1);
        assert!(scalar.insert("a", 1).is_err());
        assert!(scalar.push(1).is_err());
    }

    #[test]
    fn test_display() {
        let value = DynamicValue::from_entries([("b", DynamicValue::from(true)), ("a", vec![DynamicValue::from(1), DynamicValue::None].into())]);
        assert_eq!(value.to_string(), r#"{"a": [1, null], "b": true}"#);
    }
}
