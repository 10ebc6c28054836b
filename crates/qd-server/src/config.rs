//! Server configuration — defaults, then a JSON config file, then CLI/env.

use anyhow::Context;
use clap::Parser;
use qd_search::SearchOptions;
use qd_store::LoadLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "quivly-docs-mcp", version, about = "Quivly documentation MCP server (stdio)")]
pub struct Cli {
    /// JSON config file. Defaults to <config dir>/quivly-docs/config.json if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Corpus JSON file. The bundled corpus is used when unset.
    #[arg(long, env = "QUIVLY_DOCS_CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Characters of context on each side of a search match.
    #[arg(long, env = "QUIVLY_DOCS_SNIPPET_WINDOW")]
    pub snippet_window: Option<usize>,

    /// Result limit when search_docs is called without one.
    #[arg(long)]
    pub default_limit: Option<usize>,

    /// Maximum content nesting accepted when loading the corpus.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum content nodes accepted in one section when loading the corpus.
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "QUIVLY_DOCS_LOG")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub corpus_path: Option<PathBuf>,
    pub snippet_window: usize,
    pub default_limit: usize,
    pub max_depth: usize,
    pub max_nodes: usize,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let search = SearchOptions::default();
        let limits = LoadLimits::default();
        Self {
            name: "quivly-docs".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            corpus_path: None,
            snippet_window: search.window,
            default_limit: search.limit,
            max_depth: limits.max_depth,
            max_nodes: limits.max_nodes,
            log_level: "info".into(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quivly-docs").join("config.json"))
    }

    /// Merge defaults, the config file, and CLI/env overrides.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Some(corpus) = &cli.corpus {
            config.corpus_path = Some(corpus.clone());
        }
        if let Some(window) = cli.snippet_window {
            config.snippet_window = window;
        }
        if let Some(limit) = cli.default_limit {
            config.default_limit = limit;
        }
        if let Some(depth) = cli.max_depth {
            config.max_depth = depth;
        }
        if let Some(nodes) = cli.max_nodes {
            config.max_nodes = nodes;
        }
        if let Some(level) = &cli.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::default()
            .with_limit(self.default_limit)
            .with_window(self.snippet_window)
    }

    pub fn load_limits(&self) -> LoadLimits {
        LoadLimits {
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "quivly-docs-{name}-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.snippet_window, 100);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.max_nodes, 100_000);
        assert_eq!(config.load_limits(), LoadLimits::default());
        assert!(config.corpus_path.is_none());
        assert_eq!(config.search_options(), SearchOptions::default());
    }

    #[test]
    fn file_then_cli_precedence() {
        let path = temp_config(
            "precedence",
            r#"{ "snippet_window": 60, "default_limit": 5, "log_level": "debug" }"#,
        );
        let cli = Cli::try_parse_from([
            "quivly-docs-mcp",
            "--config",
            path.to_str().unwrap(),
            "--default-limit",
            "3",
            "--max-nodes",
            "50",
        ])
        .unwrap();

        let config = ServerConfig::resolve(&cli).unwrap();
        assert_eq!(config.snippet_window, 60);
        assert_eq!(config.default_limit, 3);
        assert_eq!(config.name, "quivly-docs");
        assert_eq!(config.load_limits().max_nodes, 50);
        assert_eq!(config.load_limits().max_depth, 64);

        let search = config.search_options();
        assert_eq!(search.window, 60);
        assert_eq!(search.limit, 3);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn bad_config_file() {
        let path = temp_config("bad", "{ not json");
        assert!(ServerConfig::from_file(&path).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_config_file() {
        let cli = Cli::try_parse_from(["quivly-docs-mcp", "--config", "/nonexistent/qd.json"])
            .unwrap();
        assert!(ServerConfig::resolve(&cli).is_err());
    }
}
