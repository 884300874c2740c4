//! Conversion to and from `serde_json::Value`
//!
//! JSON is the external representation used at the serialization boundary.
//! The mapping is lossless for every value JSON can hold; anything JSON
//! cannot hold is rejected with [`ValueError::Unrepresentable`] instead of
//! being coerced.

use serde_json::{Map, Number, Value as JsonValue};

use crate::error::{Result, ValueError};
use crate::value::{DynamicValue, ValueList, ValueMap};

/// Convert an external JSON value into a dynamic value
pub fn from_json(json: &JsonValue) -> Result<DynamicValue> {
    Ok(match json {
        JsonValue::Null => DynamicValue::None,
        JsonValue::Bool(b) => DynamicValue::Bool(*b),
        JsonValue::Number(n) => number_to_value(n)?,
        JsonValue::String(s) => DynamicValue::String(s.clone()),
        JsonValue::Array(items) => DynamicValue::List(
            items.iter().map(from_json).collect::<Result<ValueList>>()?,
        ),
        JsonValue::Object(entries) => DynamicValue::Map(object_to_map(entries)?),
    })
}

/// Convert a dynamic value into its external JSON form
pub fn to_json(value: &DynamicValue) -> Result<JsonValue> {
    Ok(match value {
        DynamicValue::None => JsonValue::Null,
        DynamicValue::Bool(b) => JsonValue::Bool(*b),
        DynamicValue::Int(i) => JsonValue::Number(Number::from(*i)),
        DynamicValue::Float(f) => {
            let number = Number::from_f64(f64::from(*f))
                .ok_or_else(|| ValueError::Unrepresentable(format!("float {} has no JSON form", f)))?;
            JsonValue::Number(number)
        }
        DynamicValue::String(s) => JsonValue::String(s.clone()),
        DynamicValue::List(items) => {
            JsonValue::Array(items.iter().map(to_json).collect::<Result<Vec<_>>>()?)
        }
        DynamicValue::Map(entries) => JsonValue::Object(map_to_object(entries)?),
    })
}

/// Convert a JSON object into a value map
pub fn object_to_map(object: &Map<String, JsonValue>) -> Result<ValueMap> {
    object
        .iter()
        .map(|(key, value)| -> Result<(String, DynamicValue)> {
            Ok((key.clone(), from_json(value)?))
        })
        .collect()
}

/// Convert a value map into a JSON object
pub fn map_to_object(map: &ValueMap) -> Result<Map<String, JsonValue>> {
    map.iter()
        .map(|(key, value)| -> Result<(String, JsonValue)> {
            Ok((key.clone(), to_json(value)?))
        })
        .collect()
}

fn number_to_value(n: &Number) -> Result<DynamicValue> {
    if let Some(i) = n.as_i64() {
        return Ok(DynamicValue::Int(i));
    }
    if n.is_u64() {
        return Err(ValueError::Unrepresentable(format!("integer {} exceeds i64", n)));
    }
    let wide = n
        .as_f64()
        .ok_or_else(|| ValueError::Unrepresentable(format!("number {}", n)))?;
    let narrow = wide as f32;
    if !narrow.is_finite() {
        return Err(ValueError::Unrepresentable(format!("float {} overflows f32", wide)));
    }
    if narrow == 0.0 && wide != 0.0 {
        return Err(ValueError::Unrepresentable(format!("float {} underflows f32", wide)));
    }
    Ok(DynamicValue::Float(narrow))
}

impl TryFrom<&JsonValue> for DynamicValue {
    type Error = ValueError;

    fn try_from(json: &JsonValue) -> Result<Self> {
        from_json(json)
    }
}

impl TryFrom<&DynamicValue> for JsonValue {
    type Error = ValueError;

    fn try_from(value: &DynamicValue) -> Result<Self> {
        to_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitives_map_directly() {
        assert_eq!(from_json(&json!(null)).unwrap(), DynamicValue::None);
        assert_eq!(from_json(&json!(true)).unwrap(), DynamicValue::Bool(true));
        assert_eq!(from_json(&json!(-12)).unwrap(), DynamicValue::Int(-12));
        assert_eq!(from_json(&json!(0.5)).unwrap(), DynamicValue::Float(0.5));
        assert_eq!(from_json(&json!("sprite.png")).unwrap(), DynamicValue::from("sprite.png"));
    }

    #[test]
    fn test_integral_float_keeps_float_tag() {
        let text = serde_json::to_string(&to_json(&DynamicValue::Float(2.0)).unwrap()).unwrap();
        let parsed: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(from_json(&parsed).unwrap(), DynamicValue::Float(2.0));
    }

    #[test]
    fn test_tree_round_trip() {
        let value = DynamicValue::from_entries([
            ("position", DynamicValue::from_entries([("x", 10.5f32), ("y", -3.25f32)])),
            ("visible", DynamicValue::from(true)),
            ("frames", vec![DynamicValue::from("a"), DynamicValue::from("b")].into()),
            ("parent", DynamicValue::None),
            ("z", DynamicValue::from(i64::MIN)),
        ]);

        let json = to_json(&value).unwrap();
        assert_eq!(json["position"]["y"].as_f64(), Some(-3.25));
        assert_eq!(from_json(&json).unwrap(), value);

        let text = serde_json::to_string(&json).unwrap();
        let reparsed: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(DynamicValue::try_from(&reparsed).unwrap(), value);
    }

    #[test]
    fn test_unrepresentable_values_fail() {
        assert!(matches!(
            to_json(&DynamicValue::Float(f32::NAN)),
            Err(ValueError::Unrepresentable(_))
        ));
        assert!(matches!(
            to_json(&vec![DynamicValue::Float(f32::INFINITY)].into_iter().collect()),
            Err(ValueError::Unrepresentable(_))
        ));
        assert!(matches!(
            from_json(&json!(u64::MAX)),
            Err(ValueError::Unrepresentable(_))
        ));
        assert!(matches!(
            from_json(&json!(1e300)),
            Err(ValueError::Unrepresentable(_))
        ));
    }

    #[test]
    fn test_float_underflow_fails() {
        assert!(matches!(
            from_json(&json!(1e-50)),
            Err(ValueError::Unrepresentable(_))
        ));
        assert!(matches!(
            from_json(&json!(-1e-50)),
            Err(ValueError::Unrepresentable(_))
        ));
        assert_eq!(from_json(&json!(0.0)).unwrap(), DynamicValue::Float(0.0));
        assert_eq!(from_json(&json!(-0.0)).unwrap(), DynamicValue::Float(0.0));
    }
}
