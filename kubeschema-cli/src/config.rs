//! Configuration file loading for kubeschema.
//!
//! Discovers and loads `kubeschema.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use kubeschema_domain::DEFAULT_MAX_DEPTH;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "kubeschema.toml";

pub const DEFAULT_APIS_DIR: &str = "apis/k8s";
pub const DEFAULT_STATE_FILE: &str = ".kubeschema/state.json";

/// Top-level configuration from kubeschema.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KubeschemaConfig {
    pub catalog: CatalogConfig,
    pub resolve: ResolveConfig,
}

/// Catalog section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding `<version>/swagger.json` documents.
    pub apis_dir: Utf8PathBuf,

    /// Version pinned by the config file. Beats the saved selection.
    pub version: Option<String>,

    /// Where `kubeschema use` persists the selected version.
    pub state_file: Utf8PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            apis_dir: Utf8PathBuf::from(DEFAULT_APIS_DIR),
            version: None,
            state_file: Utf8PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

/// Resolve section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Maximum `$ref` expansion depth.
    pub max_depth: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Discover the kubeschema.toml config file in `dir`.
///
/// Returns `None` if no config file is found.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a kubeschema.toml config file.
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<KubeschemaConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<KubeschemaConfig> {
    let config: KubeschemaConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<KubeschemaConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(KubeschemaConfig::default()),
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub apis_dir: Option<Utf8PathBuf>,
    pub version: Option<String>,
    pub state_file: Option<Utf8PathBuf>,
    pub max_depth: Option<usize>,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub apis_dir: Utf8PathBuf,

    /// Explicitly requested version (CLI, then config file).
    pub version: Option<String>,

    pub state_file: Utf8PathBuf,
    pub max_depth: usize,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: KubeschemaConfig,
}

impl ConfigMerger {
    pub fn new(config: KubeschemaConfig) -> Self {
        Self { config }
    }

    /// Every value given on the command line replaces the file value.
    pub fn merge(self, cli: CliOverrides) -> MergedConfig {
        let KubeschemaConfig { catalog, resolve } = self.config;
        MergedConfig {
            apis_dir: cli.apis_dir.unwrap_or(catalog.apis_dir),
            version: cli.version.or(catalog.version),
            state_file: cli.state_file.unwrap_or(catalog.state_file),
            max_depth: cli.max_depth.unwrap_or(resolve.max_depth),
        }
    }
}
