//! Built-in node loaders
//!
//! One unit-struct loader per node kind. Each kind lists its descriptors in
//! a `const` slice and chains to [`BaseNodeLoader`] for the shared node
//! properties.

mod layout;
mod node;
mod skeleton;
mod sprite;

pub use layout::LayoutLoader;
pub use node::BaseNodeLoader;
pub use skeleton::SkeletonAnimationLoader;
pub use sprite::SpriteLoader;
