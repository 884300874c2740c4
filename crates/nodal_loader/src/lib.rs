//! # nodal_loader - Node Serialization Framework
//!
//! Maps strongly typed scene nodes to and from property maps of
//! [`DynamicValue`](nodal_value::DynamicValue)s, dispatched by class name.
//!
//! ## Architecture
//!
//! ```text
//! NodeRecord ──► PropertyHandler ──► NodeLoaderRegistry::resolve(class)
//!                                            │
//!                                            ▼
//!                      NodeLoader::create_node + load_properties
//!                      (base descriptors first, then the kind's own)
//! ```
//!
//! - [`PropertyDescriptor`]: a name plus getter/setter pair, `const` per kind
//! - [`PropertyHandler`]: the per-node `name -> value` bag
//! - [`NodeLoader`]: per-kind behaviour object, chained to its base loader
//! - [`NodeLoaderRegistry`]: class name to loader prototype
//! - [`GraphReader`] / [`GraphWriter`]: whole trees to and from [`NodeRecord`]s
//! - [`UnknownNode`]: placeholder that keeps an unregistered record for writing back
//!
//! ## Example
//!
//! ```
//! use nodal_loader::prelude::*;
//! use nodal_scene::Sprite;
//!
//! let registry = NodeLoaderRegistry::with_builtin_loaders();
//!
//! let mut handler = PropertyHandler::new("Sprite");
//! handler.set("flipped_x", true);
//!
//! let (node, issues) = registry.create_node(&handler).unwrap();
//! assert!(issues.is_empty());
//! assert!(node.downcast_ref::<Sprite>().unwrap().is_flipped_x());
//! ```

pub use nodal_value;

pub mod config;
pub mod error;
pub mod graph;
pub mod handler;
pub mod loader;
pub mod loaders;
pub mod placeholder;
pub mod property;
pub mod record;
pub mod registry;

pub use config::{GraphConfig, UnknownNodePolicy};
pub use error::{LoaderError, Result};
pub use graph::{load_scene, read_scene_file, save_scene, write_scene_file, GraphReader, GraphWriter, LoadIssue, LoadedGraph};
pub use handler::PropertyHandler;
pub use loader::{downcast_node, downcast_node_mut, NodeLoader};
pub use loaders::{BaseNodeLoader, LayoutLoader, SkeletonAnimationLoader, SpriteLoader};
pub use placeholder::UnknownNode;
pub use property::{NodeProperty, PropertyDescriptor, PropertyHelper, PropertyValue};
pub use record::{NodeRecord, SceneDocument};
pub use registry::NodeLoaderRegistry;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{GraphConfig, UnknownNodePolicy};
    pub use crate::error::{LoaderError, Result};
    pub use crate::graph::{GraphReader, GraphWriter, LoadedGraph};
    pub use crate::handler::PropertyHandler;
    pub use crate::loader::NodeLoader;
    pub use crate::property::{NodeProperty, PropertyDescriptor, PropertyHelper, PropertyValue};
    pub use crate::record::{NodeRecord, SceneDocument};
    pub use crate::registry::NodeLoaderRegistry;
}
