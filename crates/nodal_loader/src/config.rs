//! Graph loading configuration
//!
//! Controls how a scene graph reader treats records it cannot fully load.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `NODAL_UNKNOWN_NODES=placeholder`, `NODAL_STRICT=1`
//! 2. Config file passed by the caller
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! unknown_nodes = "placeholder"  # skip, placeholder, abort
//! strict_properties = false
//! pretty = true
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};

/// What a reader does with a record whose class name is not registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownNodePolicy {
    /// Drop the record and its subtree
    Skip,
    /// Substitute a placeholder that loads the base properties, keeps the
    /// original record for writing back and keeps the children
    #[default]
    Placeholder,
    /// Fail the whole load
    Abort,
}

impl fmt::Display for UnknownNodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Placeholder => write!(f, "placeholder"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

impl FromStr for UnknownNodePolicy {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "drop" => Ok(Self::Skip),
            "placeholder" | "node" => Ok(Self::Placeholder),
            "abort" | "fail" | "error" => Ok(Self::Abort),
            _ => Err(LoaderError::Config(format!("unknown node policy '{}'", s))),
        }
    }
}

/// Scene graph load/save configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Handling of unregistered class names
    pub unknown_nodes: UnknownNodePolicy,
    /// Treat any per-property failure as a failed load
    pub strict_properties: bool,
    /// Pretty-print written scene files
    pub pretty: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            unknown_nodes: UnknownNodePolicy::Placeholder,
            strict_properties: false,
            pretty: true,
        }
    }
}

impl GraphConfig {
    /// Environment variable overriding [`GraphConfig::unknown_nodes`]
    pub const ENV_UNKNOWN_NODES: &'static str = "NODAL_UNKNOWN_NODES";
    /// Environment variable overriding [`GraphConfig::strict_properties`]
    pub const ENV_STRICT: &'static str = "NODAL_STRICT";

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LoaderError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded graph config from {}", path.display());
        Ok(config)
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(policy) = lookup(Self::ENV_UNKNOWN_NODES) {
            self.unknown_nodes = policy.parse()?;
            log::info!("Unknown node policy from env: {}", self.unknown_nodes);
        }
        if let Some(strict) = lookup(Self::ENV_STRICT) {
            self.strict_properties = strict == "1" || strict.eq_ignore_ascii_case("true");
        }
        Ok(())
    }

    /// Set the unknown node policy
    pub fn with_unknown_nodes(mut self, policy: UnknownNodePolicy) -> Self {
        self.unknown_nodes = policy;
        self
    }

    /// Set strict property handling
    pub fn with_strict_properties(mut self, strict: bool) -> Self {
        self.strict_properties = strict;
        self
    }

    /// Set pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
