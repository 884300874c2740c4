//! # nodal_scene - Scene-Graph Node Kinds
//!
//! The engine-side node types the serialization framework works against.
//! Every kind exposes its state only through getter/setter pairs; the
//! framework never reaches into fields directly.
//!
//! All kinds share a [`NodeBase`] holding the common transform, display
//! state and children. Concrete kinds embed it and hand it out through the
//! [`Node`] trait, which also provides checked downcasting.

pub mod node;
pub mod types;
pub mod sprite;
pub mod layout;
pub mod skeleton;

pub use node::{Node, NodeBase};
pub use types::{BlendFunc, Color3B, Point, Rect, Size};
pub use sprite::Sprite;
pub use layout::{BackgroundColorType, ClippingType, Layout, LayoutType};
pub use skeleton::SkeletonAnimation;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::node::{Node, NodeBase};
    pub use crate::types::{BlendFunc, Color3B, Point, Rect, Size};
    pub use crate::sprite::Sprite;
    pub use crate::layout::{BackgroundColorType, ClippingType, Layout, LayoutType};
    pub use crate::skeleton::SkeletonAnimation;
}
