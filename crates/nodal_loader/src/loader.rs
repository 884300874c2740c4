//! Node loaders
//!
//! A loader is the per-kind behaviour object that creates nodes of its kind
//! and moves their properties in and out of a [`PropertyHandler`]. Loaders
//! hold no per-node state, so one prototype serves every node of a kind.
//!
//! Derived kinds chain explicitly: a derived loader calls its base loader's
//! `load_properties`/`store_properties` first and then applies its own
//! descriptors. Base properties therefore always run before derived ones,
//! and a derived descriptor reusing a base key wins on store.

use std::any::TypeId;
use std::fmt;

use nodal_scene::Node;

use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;

/// Per-kind node behaviour
pub trait NodeLoader: Send + Sync + fmt::Debug + 'static {
    /// Class name identifying this kind in records and in the registry
    fn class_name(&self) -> &'static str;

    /// Concrete node type this loader creates
    fn node_type(&self) -> TypeId;

    /// Create a default-initialized node
    fn create_node(&self) -> Box<dyn Node>;

    /// Apply handler entries to the node, base properties first.
    ///
    /// Returns the per-property failures; those properties keep their
    /// current value. Fails as a whole only when the node is not of this
    /// loader's kind.
    fn load_properties(&self, node: &mut dyn Node, handler: &PropertyHandler) -> Result<Vec<LoaderError>>;

    /// Capture the node's properties into the handler, base properties first
    fn store_properties(&self, node: &dyn Node, handler: &mut PropertyHandler) -> Result<()>;

    /// Property names handled by this loader, base names first
    fn property_names(&self) -> Vec<&'static str>;

    /// Clone into an independently owned loader
    fn clone_box(&self) -> Box<dyn NodeLoader>;
}

impl dyn NodeLoader {
    /// Create a node of this kind and load the handler into it
    pub fn build_node(&self, handler: &PropertyHandler) -> Result<(Box<dyn Node>, Vec<LoaderError>)> {
        let mut node = self.create_node();
        let issues = self.load_properties(node.as_mut(), handler)?;
        Ok((node, issues))
    }

    /// Capture a node into a fresh handler tagged with this loader's class name
    pub fn capture(&self, node: &dyn Node) -> Result<PropertyHandler> {
        let mut handler = PropertyHandler::new(self.class_name());
        self.store_properties(node, &mut handler)?;
        Ok(handler)
    }
}

impl Clone for Box<dyn NodeLoader> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Checked downcast of a node to the kind a loader expects
pub fn downcast_node<'a, T: Node>(node: &'a dyn Node, loader: &'static str) -> Result<&'a T> {
    let found = node.kind_name();
    node.as_any()
        .downcast_ref::<T>()
        .ok_or(LoaderError::InvalidDowncast { loader, found })
}

/// Checked mutable downcast of a node to the kind a loader expects
pub fn downcast_node_mut<'a, T: Node>(node: &'a mut dyn Node, loader: &'static str) -> Result<&'a mut T> {
    let found = node.kind_name();
    node.as_any_mut()
        .downcast_mut::<T>()
        .ok_or(LoaderError::InvalidDowncast { loader, found })
}

/// Merge property name lists, keeping the first occurrence of each name
pub(crate) fn chain_names(base: Vec<&'static str>, own: &[&'static str]) -> Vec<&'static str> {
    let mut names = base;
    for name in own {
        if !names.contains(name) {
            names.push(*name);
        }
    }
    names
}
