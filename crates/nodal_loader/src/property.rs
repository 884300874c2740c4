//! Property descriptors
//!
//! A descriptor binds a property name to a typed getter/setter pair on one
//! node kind. Descriptors are plain `const` data: a name and two function
//! pointers, shared by every node of that kind.
//!
//! Conversion between the property type and [`DynamicValue`] goes through
//! [`PropertyValue`]. Compound engine types become sub-maps and enums become
//! integer tags.

use std::fmt;
use std::marker::PhantomData;

use nodal_scene::{BackgroundColorType, BlendFunc, ClippingType, Color3B, LayoutType, Point, Rect, Size};
use nodal_value::{DynamicValue, Result as ValueResult, ValueError};

use crate::error::Result;
use crate::handler::PropertyHandler;

/// Conversion between a property type and its dynamic representation
pub trait PropertyValue: Sized {
    /// Convert to a dynamic value
    fn to_value(&self) -> DynamicValue;

    /// Convert from a dynamic value, failing on a wrong tag or shape
    fn from_value(value: &DynamicValue) -> ValueResult<Self>;
}

/// A named getter/setter binding against node kind `N`
pub struct PropertyDescriptor<N, T> {
    name: &'static str,
    read: fn(&N) -> T,
    write: fn(&mut N, T),
}

impl<N, T> PropertyDescriptor<N, T> {
    /// Create a descriptor
    pub const fn new(name: &'static str, read: fn(&N) -> T, write: fn(&mut N, T)) -> Self {
        Self { name, read, write }
    }

    /// Property name used as the handler key
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read the property from a node
    pub fn read(&self, node: &N) -> T {
        (self.read)(node)
    }

    /// Write the property into a node
    pub fn write(&self, node: &mut N, value: T) {
        (self.write)(node, value)
    }
}

impl<N, T> Clone for PropertyDescriptor<N, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, T> Copy for PropertyDescriptor<N, T> {}

impl<N, T> fmt::Debug for PropertyDescriptor<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Factory for descriptors bound to node kind `N`
pub struct PropertyHelper<N>(PhantomData<fn(&N)>);

impl<N> PropertyHelper<N> {
    /// Bind a reader and a writer under `name`
    pub const fn make<T>(
        name: &'static str,
        read: fn(&N) -> T,
        write: fn(&mut N, T),
    ) -> PropertyDescriptor<N, T> {
        PropertyDescriptor::new(name, read, write)
    }
}

/// Type-erased descriptor, so a node kind can list its properties in one slice
pub trait NodeProperty<N> {
    /// Property name
    fn name(&self) -> &'static str;

    /// Apply the handler entry to the node. `Ok(false)` when the key is absent.
    fn load(&self, handler: &PropertyHandler, node: &mut N) -> Result<bool>;

    /// Capture the node's value into the handler
    fn store(&self, node: &N, handler: &mut PropertyHandler);
}

impl<N, T: PropertyValue> NodeProperty<N> for PropertyDescriptor<N, T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn load(&self, handler: &PropertyHandler, node: &mut N) -> Result<bool> {
        handler.load(self, node)
    }

    fn store(&self, node: &N, handler: &mut PropertyHandler) {
        handler.store(self, node)
    }
}

// ========== Primitive conversions ==========

impl PropertyValue for bool {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Bool(*self)
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        value.try_bool()
    }
}

impl PropertyValue for i64 {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Int(*self)
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        value.try_int()
    }
}

impl PropertyValue for i32 {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Int(i64::from(*self))
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        narrow_int(value, "i32")
    }
}

impl PropertyValue for u8 {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Int(i64::from(*self))
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        narrow_int(value, "u8")
    }
}

impl PropertyValue for u32 {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Int(i64::from(*self))
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        narrow_int(value, "u32")
    }
}

impl PropertyValue for f32 {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::Float(*self)
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        value.try_float()
    }
}

impl PropertyValue for String {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::String(self.clone())
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        value.try_str().map(str::to_owned)
    }
}

fn narrow_int<T: TryFrom<i64>>(value: &DynamicValue, target: &'static str) -> ValueResult<T> {
    let wide = value.try_int()?;
    T::try_from(wide).map_err(|_| ValueError::out_of_range(wide, target))
}

fn field<T: PropertyValue>(value: &DynamicValue, key: &str) -> ValueResult<T> {
    T::from_value(value.field(key)?)
}

// ========== Compound conversions ==========

impl PropertyValue for Point {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::from_entries([("x", self.x), ("y", self.y)])
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        Ok(Point::new(field(value, "x")?, field(value, "y")?))
    }
}

impl PropertyValue for Size {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::from_entries([("width", self.width), ("height", self.height)])
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        Ok(Size::new(field(value, "width")?, field(value, "height")?))
    }
}

impl PropertyValue for Rect {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::from_entries([
            ("x", self.origin.x),
            ("y", self.origin.y),
            ("width", self.size.width),
            ("height", self.size.height),
        ])
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        Ok(Rect::new(
            field(value, "x")?,
            field(value, "y")?,
            field(value, "width")?,
            field(value, "height")?,
        ))
    }
}

impl PropertyValue for Color3B {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::from_entries([
            ("r", i64::from(self.r)),
            ("g", i64::from(self.g)),
            ("b", i64::from(self.b)),
        ])
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        Ok(Color3B::new(field(value, "r")?, field(value, "g")?, field(value, "b")?))
    }
}

impl PropertyValue for BlendFunc {
    fn to_value(&self) -> DynamicValue {
        DynamicValue::from_entries([("src", i64::from(self.src)), ("dst", i64::from(self.dst))])
    }

    fn from_value(value: &DynamicValue) -> ValueResult<Self> {
        Ok(BlendFunc::new(field(value, "src")?, field(value, "dst")?))
    }
}

/// Implement [`PropertyValue`] for a fieldless enum, stored as an integer tag.
///
/// ```ignore
/// property_enum!(LayoutType {
///     Absolute = 0,
///     Vertical = 1,
/// });
/// ```
#[macro_export]
macro_rules! property_enum {
    ($ty:ident { $($variant:ident = $tag:expr),+ $(,)? }) => {
        impl $crate::property::PropertyValue for $ty {
            fn to_value(&self) -> $crate::nodal_value::DynamicValue {
                let tag: i64 = match self {
                    $($ty::$variant => $tag,)+
                };
                $crate::nodal_value::DynamicValue::Int(tag)
            }

            fn from_value(
                value: &$crate::nodal_value::DynamicValue,
            ) -> $crate::nodal_value::Result<Self> {
                match value.try_int()? {
                    $(tag if tag == $tag => Ok($ty::$variant),)+
                    other => Err($crate::nodal_value::ValueError::out_of_range(
                        other,
                        stringify!($ty),
                    )),
                }
            }
        }
    };
}

property_enum!(BackgroundColorType {
    None = 0,
    Solid = 1,
    Gradient = 2,
});

property_enum!(ClippingType {
    Stencil = 0,
    Scissor = 1,
});

property_enum!(LayoutType {
    Absolute = 0,
    Vertical = 1,
    Horizontal = 2,
    Relative = 3,
});

#[cfg(test)]
mod tests {
    use super::*;
    use nodal_value::ValueType;

    struct Counter {
        count: i32,
    }

    const COUNT: PropertyDescriptor<Counter, i32> =
        PropertyHelper::<Counter>::make("count", |node| node.count, |node, value| node.count = value);

    #[test]
    fn test_descriptor_binds_accessors() {
        let mut counter = Counter { count: 3 };
        assert_eq!(COUNT.name(), "count");
        assert_eq!(COUNT.read(&counter), 3);
        COUNT.write(&mut counter, 9);
        assert_eq!(counter.count, 9);
    }

    #[test]
    fn test_narrowing_checks_range() {
        assert_eq!(u8::from_value(&DynamicValue::Int(200)), Ok(200));
        assert_eq!(
            u8::from_value(&DynamicValue::Int(256)),
            Err(ValueError::out_of_range(256, "u8"))
        );
        assert!(i32::from_value(&DynamicValue::Int(i64::MAX)).is_err());
        assert_eq!(
            i32::from_value(&DynamicValue::Float(1.0)),
            Err(ValueError::type_mismatch(ValueType::Int, ValueType::Float))
        );
    }

    #[test]
    fn test_compound_types_are_sub_maps() {
        let point = Point::new(1.5, -2.0);
        let value = point.to_value();
        assert_eq!(value.get("x"), Some(&DynamicValue::Float(1.5)));
        assert_eq!(Point::from_value(&value), Ok(point));

        let color = Color3B::new(10, 20, 30);
        assert_eq!(color.to_value().get("g"), Some(&DynamicValue::Int(20)));
        assert_eq!(Color3B::from_value(&color.to_value()), Ok(color));

        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Rect::from_value(&rect.to_value()), Ok(rect));
    }

    #[test]
    fn test_compound_missing_field() {
        let partial = DynamicValue::from_entries([("x", 1.0f32)]);
        assert_eq!(
            Point::from_value(&partial),
            Err(ValueError::MissingField("y".into()))
        );
        assert!(Size::from_value(&DynamicValue::from("big")).is_err());
    }

    #[test]
    fn test_enums_are_integer_tags() {
        assert_eq!(LayoutType::Horizontal.to_value(), DynamicValue::Int(2));
        assert_eq!(LayoutType::from_value(&DynamicValue::Int(3)), Ok(LayoutType::Relative));
        assert_eq!(
            LayoutType::from_value(&DynamicValue::Int(9)),
            Err(ValueError::out_of_range(9, "LayoutType"))
        );
    }
}
