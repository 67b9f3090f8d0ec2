//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/cattree/cattree.toml`
//! 3. Environment variables: `CATTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Languages updated by `update-all` when the config does not override
/// them. Matches the published dataset.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "en", "ceb", "de", "sv", "fr", "nl", "ru", "es", "it", "arz", "pl", "ja", "zh", "vi", "uk",
    "ar", "pt", "fa", "ca", "sr", "ko", "no", "ce", "fi", "tr", "hu", "cs", "tt", "sh", "ro",
    "eu", "ms", "eo",
];

/// Fetcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    /// Root category title, without the namespace prefix
    pub root_category: String,
    /// How deep the fetcher follows subcategories
    pub max_fetch_depth: usize,
    /// User agent sent to the API
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            root_category: "Contents".into(),
            max_fetch_depth: 100,
            user_agent: concat!("cattree/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// Unified configuration for cattree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Output directory for per-language datasets
    pub data_dir: PathBuf,
    /// Languages processed by `update-all`
    pub languages: Vec<String>,
    /// Percentile of the page-count distribution used as the trim cutoff
    pub pages_percentile: u8,
    /// Depth bound applied after the other trim passes, None = unbounded
    pub max_depth: Option<u32>,
    /// Fetcher settings
    pub fetch: FetchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            pages_percentile: 65,
            max_depth: Some(100),
            fetch: FetchConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings: compiled defaults, then the global config file, then
    /// `CATTREE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref())
    }

    /// Load settings with an explicit config file (missing file is fine).
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(false));
        }
        // Double underscore separates nested keys: CATTREE_FETCH__ROOT_CATEGORY
        builder = builder.add_source(
            Environment::with_prefix("CATTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Path of the global config file, if a home directory is resolvable.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "cattree").map(|dirs| dirs.config_dir().join("cattree.toml"))
    }
}

/// Default output directory: XDG data dir, falling back to ./data.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "cattree")
        .map(|dirs| dirs.data_dir().join("category_tree_data"))
        .unwrap_or_else(|| PathBuf::from("data").join("category_tree_data"))
}
