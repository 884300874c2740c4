//! Node loader registry
//!
//! Maps class names to loader prototypes. The registry is filled once by an
//! explicit registration call and only read afterwards; callers share it by
//! reference.

use std::any::TypeId;
use std::collections::BTreeMap;

use nodal_scene::Node;

use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;
use crate::loader::NodeLoader;
use crate::loaders::{BaseNodeLoader, LayoutLoader, SkeletonAnimationLoader, SpriteLoader};

/// Registry of node loaders keyed by class name
#[derive(Debug, Default)]
pub struct NodeLoaderRegistry {
    /// Loaders by class name
    loaders: BTreeMap<String, Box<dyn NodeLoader>>,
    /// Class name by concrete node type
    by_type: BTreeMap<TypeId, String>,
}

impl NodeLoaderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in loader
    pub fn with_builtin_loaders() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_loaders();
        registry
    }

    /// Register the built-in loaders in base-before-derived order.
    ///
    /// Kinds already present are left alone.
    pub fn register_builtin_loaders(&mut self) {
        let builtins: [Box<dyn NodeLoader>; 4] = [
            Box::new(BaseNodeLoader),
            Box::new(SpriteLoader),
            Box::new(LayoutLoader),
            Box::new(SkeletonAnimationLoader),
        ];
        for loader in builtins {
            if let Err(e) = self.register_boxed(loader) {
                log::debug!("Keeping existing loader: {}", e);
            }
        }
    }

    /// Register a loader
    pub fn register<L: NodeLoader + 'static>(&mut self, loader: L) -> Result<()> {
        self.register_boxed(Box::new(loader))
    }

    /// Register a boxed loader, rejecting a class name that is already taken
    pub fn register_boxed(&mut self, loader: Box<dyn NodeLoader>) -> Result<()> {
        let class_name = loader.class_name();
        if self.loaders.contains_key(class_name) {
            return Err(LoaderError::DuplicateNodeKind(class_name.to_string()));
        }

        log::debug!(
            "Registered node loader '{}' ({} properties)",
            class_name,
            loader.property_names().len()
        );
        self.by_type.entry(loader.node_type()).or_insert_with(|| class_name.to_string());
        self.loaders.insert(class_name.to_string(), loader);
        Ok(())
    }

    /// Look up the loader for a class name
    pub fn resolve(&self, class_name: &str) -> Result<&dyn NodeLoader> {
        self.loaders
            .get(class_name)
            .map(|loader| loader.as_ref())
            .ok_or_else(|| LoaderError::UnknownNodeKind(class_name.to_string()))
    }

    /// Produce an independently owned loader for a class name
    pub fn instantiate(&self, class_name: &str) -> Result<Box<dyn NodeLoader>> {
        self.resolve(class_name).map(|loader| loader.clone_box())
    }

    /// Find the loader that produces nodes of this node's concrete type
    pub fn loader_for_node(&self, node: &dyn Node) -> Result<&dyn NodeLoader> {
        let type_id = node.as_any().type_id();
        let class_name = self
            .by_type
            .get(&type_id)
            .ok_or(LoaderError::UnregisteredNodeType(node.kind_name()))?;
        self.resolve(class_name)
    }

    /// Create a node for a handler's class name and load the handler into it
    pub fn create_node(&self, handler: &PropertyHandler) -> Result<(Box<dyn Node>, Vec<LoaderError>)> {
        let loader = self.resolve(handler.class_name())?;
        log::debug!("Creating '{}' node", loader.class_name());
        loader.build_node(handler)
    }

    /// Capture a node into a handler tagged with its class name
    pub fn store_node(&self, node: &dyn Node) -> Result<PropertyHandler> {
        self.loader_for_node(node)?.capture(node)
    }

    /// Check if a class name is registered
    pub fn contains(&self, class_name: &str) -> bool {
        self.loaders.contains_key(class_name)
    }

    /// Registered class names in sorted order
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    /// Iterate over registered loaders in class name order
    pub fn iter(&self) -> impl Iterator<Item = &dyn NodeLoader> {
        self.loaders.values().map(|loader| loader.as_ref())
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodal_scene::{NodeBase, Sprite};
    use nodal_value::DynamicValue;

    #[test]
    fn test_builtin_registration() {
        let registry = NodeLoaderRegistry::with_builtin_loaders();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains("Node"));
        assert!(registry.contains("Sprite"));
        assert!(registry.contains("Layout"));
        assert!(registry.contains("SkeletonAnimation"));
        assert_eq!(
            registry.class_names().collect::<Vec<_>>(),
            vec!["Layout", "Node", "SkeletonAnimation", "Sprite"]
        );
    }

    #[test]
    fn test_unknown_kind() {
        let registry = NodeLoaderRegistry::with_builtin_loaders();
        let err = registry.resolve("unknown_kind_xyz").unwrap_err();
        assert!(matches!(err, LoaderError::UnknownNodeKind(ref name) if name == "unknown_kind_xyz"));
        assert!(registry.instantiate("unknown_kind_xyz").is_err());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = NodeLoaderRegistry::new();
        registry.register(SpriteLoader).unwrap();
        let err = registry.register(SpriteLoader).unwrap_err();
        assert!(matches!(err, LoaderError::DuplicateNodeKind(ref name) if name == "Sprite"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_instantiate_is_independent() {
        let registry = NodeLoaderRegistry::with_builtin_loaders();
        let loader = registry.instantiate("Sprite").unwrap();
        drop(registry);

        let node = loader.create_node();
        assert!(node.is::<Sprite>());
        assert_eq!(loader.class_name(), "Sprite");
    }

    #[test]
    fn test_loader_for_node() {
        let registry = NodeLoaderRegistry::with_builtin_loaders();
        let sprite = Sprite::new();
        let base = NodeBase::new();
        assert_eq!(registry.loader_for_node(&sprite).unwrap().class_name(), "Sprite");
        assert_eq!(registry.loader_for_node(&base).unwrap().class_name(), "Node");

        let empty = NodeLoaderRegistry::new();
        assert!(matches!(
            empty.loader_for_node(&sprite),
            Err(LoaderError::UnregisteredNodeType("Sprite"))
        ));
    }

    #[test]
    fn test_create_and_store_node() {
        let registry = NodeLoaderRegistry::with_builtin_loaders();
        let mut handler = PropertyHandler::new("Sprite");
        handler.set("flipped_x", true);

        let (node, issues) = registry.create_node(&handler).unwrap();
        assert!(issues.is_empty());
        assert!(node.downcast_ref::<Sprite>().unwrap().is_flipped_x());

        let stored = registry.store_node(node.as_ref()).unwrap();
        assert_eq!(stored.class_name(), "Sprite");
        assert_eq!(stored.get("flipped_x"), Some(&DynamicValue::Bool(true)));
    }
}
