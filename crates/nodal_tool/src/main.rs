//! nodal - scene file tool
//!
//! Checks, normalizes and scaffolds scene files using the built-in node
//! loaders.
//!
//! Run with: cargo run -p nodal_tool -- check scene.json

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use nodal_loader::{
    read_scene_file, write_scene_file, GraphConfig, GraphReader, GraphWriter, LoadedGraph, NodeLoaderRegistry,
    SceneDocument,
};
use nodal_scene::Node;

#[derive(Parser)]
#[command(name = "nodal")]
#[command(about = "Scene file checker and normalizer")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a scene and report every issue
    Check {
        /// Path to the scene file
        file: PathBuf,
    },
    /// Load a scene and write it back in canonical form
    Normalize {
        /// Path to the scene file
        file: PathBuf,
        /// Output path, stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List registered node kinds and their properties
    Kinds,
    /// Emit a scene holding one default node of a kind
    New {
        /// Class name of the node kind
        class_name: String,
        /// Output path, stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = GraphConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let registry = NodeLoaderRegistry::with_builtin_loaders();

    match cli.command {
        Commands::Check { file } => {
            let graph = load(&file, &registry, &config)?;
            for issue in &graph.issues {
                eprintln!("{}: {}", file.display(), issue);
            }
            if !graph.is_clean() {
                bail!("{}: {} issues", file.display(), graph.issues.len());
            }
            println!("{}: ok ({} nodes)", file.display(), count_nodes(graph.root.as_ref()));
        }
        Commands::Normalize { file, output } => {
            let graph = load(&file, &registry, &config)?;
            for issue in &graph.issues {
                log::warn!("{}", issue);
            }
            let document = GraphWriter::new(&registry).write_document(graph.root.as_ref())?;
            emit(&document, output.as_deref(), config.pretty)?;
        }
        Commands::Kinds => {
            print!("{}", describe_kinds(&registry));
        }
        Commands::New { class_name, output } => {
            let document = default_document(&registry, &class_name)?;
            emit(&document, output.as_deref(), config.pretty)?;
        }
    }

    Ok(())
}

fn load(file: &Path, registry: &NodeLoaderRegistry, config: &GraphConfig) -> Result<LoadedGraph> {
    let document = read_scene_file(file).with_context(|| format!("reading {}", file.display()))?;
    let graph = GraphReader::with_config(registry, config.clone())
        .read_document(&document)
        .with_context(|| format!("loading {}", file.display()))?;
    Ok(graph)
}

fn emit(document: &SceneDocument, output: Option<&Path>, pretty: bool) -> Result<()> {
    match output {
        Some(path) => {
            write_scene_file(path, document, pretty).with_context(|| format!("writing {}", path.display()))?;
        }
        None => println!("{}", document.to_json_string(pretty)?),
    }
    Ok(())
}

fn count_nodes(node: &dyn Node) -> usize {
    1 + node
        .base()
        .children()
        .iter()
        .map(|child| count_nodes(child.as_ref()))
        .sum::<usize>()
}

fn describe_kinds(registry: &NodeLoaderRegistry) -> String {
    let mut text = String::new();
    for loader in registry.iter() {
        text.push_str(loader.class_name());
        text.push('\n');
        for name in loader.property_names() {
            text.push_str("  ");
            text.push_str(name);
            text.push('\n');
        }
    }
    text
}

fn default_document(registry: &NodeLoaderRegistry, class_name: &str) -> Result<SceneDocument> {
    let loader = registry.instantiate(class_name)?;
    let node = loader.create_node();
    let document = GraphWriter::new(registry).write_document(node.as_ref())?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["nodal", "normalize", "in.json", "-o", "out.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Normalize { output: Some(_), .. }));
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["nodal", "kinds", "--config", "nodal.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("nodal.toml")));
    }

    #[test]
    fn test_describe_kinds() {
        let registry = NodeLoaderRegistry::with_builtin_loaders();
        let text = describe_kinds(&registry);
        assert!(text.contains("Sprite\n"));
        assert!(text.contains("  flipped_x\n"));
        assert!(text.contains("SkeletonAnimation\n"));
    }

    #[test]
    fn test_new_then_check() {
        let registry = NodeLoaderRegistry::with_builtin_loaders();
        let document = default_document(&registry, "Sprite").unwrap();
        assert_eq!(document.root.class_name, "Sprite");
        assert!(default_document(&registry, "unknown_kind_xyz").is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.json");
        emit(&document, Some(path.as_path()), true).unwrap();

        let graph = load(&path, &registry, &GraphConfig::default()).unwrap();
        assert!(graph.is_clean());
        assert_eq!(count_nodes(graph.root.as_ref()), 1);
    }
}
