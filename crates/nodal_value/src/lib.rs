//! # nodal_value - Dynamic Values
//!
//! The dynamically typed value model that carries arbitrary node state
//! between strongly typed scene nodes and their serialized form.
//!
//! ## Overview
//!
//! A [`DynamicValue`] holds exactly one of:
//!
//! ```text
//! None | Bool | Int (i64) | Float (f32) | String | List | Map
//! ```
//!
//! Lists and maps own their elements exclusively, so every value is a tree.
//! Cloning a value is a deep copy; [`DynamicValue::take`] moves the value out
//! of its slot and leaves `None` behind.
//!
//! The [`json`] module converts values to and from `serde_json::Value`, which
//! is the external representation used by the file layer.
//!
//! ## Example
//!
//! ```
//! use nodal_value::{DynamicValue, ValueMap};
//!
//! let mut map = ValueMap::new();
//! map.insert("flipped_x".to_string(), DynamicValue::from(true));
//! let value = DynamicValue::from(map);
//!
//! assert_eq!(value.get("flipped_x"), Some(&DynamicValue::Bool(true)));
//! ```

mod error;
pub mod json;
mod value;

pub use error::{Result, ValueError};
pub use value::{DynamicValue, ValueList, ValueMap, ValueType};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, ValueError};
    pub use crate::value::{DynamicValue, ValueList, ValueMap, ValueType};
}
