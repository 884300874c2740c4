//! Scene graph reading and writing
//!
//! [`GraphReader`] turns a tree of [`NodeRecord`]s into live nodes through the
//! registry, collecting every recoverable failure as a [`LoadIssue`] instead
//! of stopping. [`GraphWriter`] captures a live tree back into records.

use std::fmt;
use std::path::Path;

use nodal_scene::Node;

use crate::config::{GraphConfig, UnknownNodePolicy};
use crate::error::{LoaderError, Result};
use crate::handler::PropertyHandler;
use crate::placeholder::UnknownNode;
use crate::record::{NodeRecord, SceneDocument};
use crate::registry::NodeLoaderRegistry;

/// A recoverable failure met while reading one record
#[derive(Debug)]
pub struct LoadIssue {
    /// Position of the record in the tree, `/` for the root and `/0/2` for
    /// the third child of the root's first child
    pub path: String,
    /// Class name stored in the record
    pub class_name: String,
    pub error: LoaderError,
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path, self.class_name, self.error)
    }
}

/// Result of reading a record tree
#[derive(Debug)]
pub struct LoadedGraph {
    pub root: Box<dyn Node>,
    pub issues: Vec<LoadIssue>,
}

impl LoadedGraph {
    /// True when every record and property loaded cleanly
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Builds node trees from records
pub struct GraphReader<'a> {
    registry: &'a NodeLoaderRegistry,
    config: GraphConfig,
}

impl<'a> GraphReader<'a> {
    /// Create a reader with the default configuration
    pub fn new(registry: &'a NodeLoaderRegistry) -> Self {
        Self::with_config(registry, GraphConfig::default())
    }

    /// Create a reader with an explicit configuration
    pub fn with_config(registry: &'a NodeLoaderRegistry, config: GraphConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build the tree rooted at `record`.
    ///
    /// Fails when the root's class name is unknown and the policy is not
    /// [`UnknownNodePolicy::Placeholder`], when any class name is unknown
    /// under [`UnknownNodePolicy::Abort`], or on the first property failure
    /// when `strict_properties` is set.
    pub fn read(&self, record: &NodeRecord) -> Result<LoadedGraph> {
        let mut issues = Vec::new();
        let root = self
            .read_node(record, "/", &mut issues)?
            .ok_or_else(|| LoaderError::UnknownNodeKind(record.class_name.clone()))?;

        if issues.is_empty() {
            log::debug!("Loaded {} records", record.subtree_len());
        } else {
            log::warn!(
                "Loaded {} records with {} issues",
                record.subtree_len(),
                issues.len()
            );
        }
        Ok(LoadedGraph { root, issues })
    }

    /// Read a scene document
    pub fn read_document(&self, document: &SceneDocument) -> Result<LoadedGraph> {
        document.check_version()?;
        self.read(&document.root)
    }

    fn read_node(&self, record: &NodeRecord, path: &str, issues: &mut Vec<LoadIssue>) -> Result<Option<Box<dyn Node>>> {
        let (handler, conversion_issues) = PropertyHandler::from_record(record);
        for error in conversion_issues {
            self.report(issues, path, record, error)?;
        }

        let (mut node, property_issues): (Box<dyn Node>, Vec<LoaderError>) =
            match self.registry.resolve(&record.class_name) {
                Ok(loader) => {
                    log::debug!("Resolved '{}' at {}", loader.class_name(), path);
                    loader.build_node(&handler)?
                }
                Err(e) => match self.config.unknown_nodes {
                    UnknownNodePolicy::Abort => return Err(e),
                    UnknownNodePolicy::Skip => {
                        log::warn!("Skipping unknown node kind '{}' at {}", record.class_name, path);
                        self.report(issues, path, record, e)?;
                        return Ok(None);
                    }
                    UnknownNodePolicy::Placeholder => {
                        log::warn!("Keeping unknown node kind '{}' at {} as a placeholder", record.class_name, path);
                        self.report(issues, path, record, e)?;
                        let (placeholder, placeholder_issues) = UnknownNode::load(record, &handler)?;
                        (Box::new(placeholder), placeholder_issues)
                    }
                },
            };
        for error in property_issues {
            self.report(issues, path, record, error)?;
        }

        for (index, child_record) in record.children.iter().enumerate() {
            let child_path = if path == "/" {
                format!("/{}", index)
            } else {
                format!("{}/{}", path, index)
            };
            if let Some(child) = self.read_node(child_record, &child_path, issues)? {
                node.base_mut().add_child(child);
            }
        }

        Ok(Some(node))
    }

    fn report(&self, issues: &mut Vec<LoadIssue>, path: &str, record: &NodeRecord, error: LoaderError) -> Result<()> {
        if self.config.strict_properties && error.is_property_error() {
            return Err(error);
        }
        issues.push(LoadIssue {
            path: path.to_string(),
            class_name: record.class_name.clone(),
            error,
        });
        Ok(())
    }
}

/// Captures node trees into records
pub struct GraphWriter<'a> {
    registry: &'a NodeLoaderRegistry,
}

impl<'a> GraphWriter<'a> {
    pub fn new(registry: &'a NodeLoaderRegistry) -> Self {
        Self { registry }
    }

    /// Capture `node` and its subtree
    pub fn write(&self, node: &dyn Node) -> Result<NodeRecord> {
        let mut record = match node.as_any().downcast_ref::<UnknownNode>() {
            Some(placeholder) => placeholder.to_record()?,
            None => NodeRecord::from_handler(&self.registry.store_node(node)?)?,
        };
        record.children = node
            .base()
            .children()
            .iter()
            .map(|child| self.write(child.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(record)
    }

    /// Capture `node` into a document at the current version
    pub fn write_document(&self, node: &dyn Node) -> Result<SceneDocument> {
        Ok(SceneDocument::new(self.write(node)?))
    }
}

/// Read a scene document from a JSON file
pub fn read_scene_file(path: impl AsRef<Path>) -> Result<SceneDocument> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let document = SceneDocument::from_json_str(&text)?;
    log::info!(
        "Read scene {} ({} records)",
        path.display(),
        document.root.subtree_len()
    );
    Ok(document)
}

/// Write a scene document to a JSON file
pub fn write_scene_file(path: impl AsRef<Path>, document: &SceneDocument, pretty: bool) -> Result<()> {
    let path = path.as_ref();
    let text = document.to_json_string(pretty)?;
    std::fs::write(path, text)?;
    log::info!(
        "Wrote scene {} ({} records)",
        path.display(),
        document.root.subtree_len()
    );
    Ok(())
}

/// Read and build a scene file in one step
pub fn load_scene(path: impl AsRef<Path>, registry: &NodeLoaderRegistry, config: &GraphConfig) -> Result<LoadedGraph> {
    let document = read_scene_file(path)?;
    GraphReader::with_config(registry, config.clone()).read_document(&document)
}

/// Capture a node tree and write it as a scene file in one step
pub fn save_scene(
    path: impl AsRef<Path>,
    root: &dyn Node,
    registry: &NodeLoaderRegistry,
    config: &GraphConfig,
) -> Result<()> {
    let document = GraphWriter::new(registry).write_document(root)?;
    write_scene_file(path, &document, config.pretty)
}
