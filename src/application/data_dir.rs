//! Per-language data directory: file layout and the four pipeline steps.
//!
//! One `DataDir` owns the artifacts of a single language:
//! `<data_dir>/<lang>/<lang>_raw_category_tree.json`,
//! `<lang>_trimmed_category_tree.json`, `<lang>_category_tree.json.gz` and
//! `meta.json`. Each step reads only what the previous step wrote, so a
//! failed step never leaves a partially written artifact for the next one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::CategoryTree;
use crate::infrastructure::fetch::Fetcher;
use crate::infrastructure::{compress, hash, serialize};

/// Resolves artifact paths inside the data directory.
#[derive(Debug, Clone)]
pub struct PathProvider {
    data_dir: PathBuf,
    language: String,
}

impl PathProvider {
    pub fn new(data_dir: &Path, language: &str) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            language: language.to_string(),
        }
    }

    fn language_dir(&self) -> PathBuf {
        self.data_dir.join(&self.language)
    }

    pub fn raw_category_tree_path(&self) -> PathBuf {
        self.language_dir()
            .join(format!("{}_raw_category_tree.json", self.language))
    }

    pub fn trimmed_category_tree_path(&self) -> PathBuf {
        self.language_dir()
            .join(format!("{}_trimmed_category_tree.json", self.language))
    }

    pub fn compressed_category_tree_path(&self) -> PathBuf {
        self.language_dir()
            .join(format!("{}_category_tree.json.gz", self.language))
    }

    pub fn meta_file_path(&self) -> PathBuf {
        self.language_dir().join("meta.json")
    }
}

/// Default behavior for interacting with one language's data repository.
pub struct DataDir {
    language: String,
    paths: PathProvider,
}

impl DataDir {
    pub fn new(language: &str, data_dir: &Path) -> Self {
        Self {
            language: language.to_string(),
            paths: PathProvider::new(data_dir, language),
        }
    }

    pub fn paths(&self) -> &PathProvider {
        &self.paths
    }

    fn ensure_dirs_exist(&self) -> ApplicationResult<()> {
        let dir = self.paths.language_dir();
        fs::create_dir_all(&dir).map_err(|e| ApplicationError::DataDirNotWritable {
            path: dir,
            source: e,
        })
    }

    /// Fetch the raw tree for this language and persist it unmodified.
    #[instrument(level = "debug", skip(self, fetcher))]
    pub fn save_raw_category_tree(&self, fetcher: &dyn Fetcher) -> ApplicationResult<()> {
        self.ensure_dirs_exist()?;

        let raw = fetcher
            .fetch(&self.language)
            .map_err(|e| ApplicationError::failed(format!("fetch {}wiki", self.language), e))?;
        serialize::write_pretty(&raw, &self.paths.raw_category_tree_path())
            .map_err(|e| ApplicationError::failed("write raw category tree", e))
    }

    /// Build the tree from the raw file, run the trim sequence, write the
    /// trimmed JSON (one-space indent, non-ASCII unescaped).
    #[instrument(level = "debug", skip(self))]
    pub fn save_trimmed_category_tree(
        &self,
        pages_percentile: u8,
        max_depth: Option<u32>,
    ) -> ApplicationResult<()> {
        self.ensure_dirs_exist()?;

        let raw = serialize::read_tree(&self.paths.raw_category_tree_path())
            .map_err(|e| ApplicationError::failed("read raw category tree", e))?;
        let mut tree = CategoryTree::from_raw(raw)?;

        tree.trim_by_page_count_percentile(pages_percentile)?;
        tree.trim_by_id_without_name();
        tree.trim_by_max_depth(max_depth);
        debug!(
            language = %self.language,
            nodes = tree.node_count(),
            "trimmed category tree"
        );

        serialize::write_pretty(&tree.to_raw(), &self.paths.trimmed_category_tree_path())
            .map_err(|e| ApplicationError::failed("write trimmed category tree", e))
    }

    /// Gzip the trimmed JSON into the published artifact.
    #[instrument(level = "debug", skip(self))]
    pub fn save_compressed_category_tree(&self) -> ApplicationResult<()> {
        self.ensure_dirs_exist()?;

        compress::gzip_file(
            &self.paths.trimmed_category_tree_path(),
            &self.paths.compressed_category_tree_path(),
        )
        .map_err(|e| ApplicationError::failed("compress trimmed category tree", e))
    }

    /// Write `meta.json`: the raw snapshot's meta block plus
    /// `uncompressed_sha256` (digest of the gunzipped artifact) and
    /// `updated` (ISO date of this run).
    #[instrument(level = "debug", skip(self))]
    pub fn save_meta_file(&self) -> ApplicationResult<()> {
        self.ensure_dirs_exist()?;

        let raw = serialize::read_tree(&self.paths.raw_category_tree_path())
            .map_err(|e| ApplicationError::failed("read raw category tree", e))?;
        let mut meta = raw.meta;

        let content = compress::gunzip_file(&self.paths.compressed_category_tree_path())
            .map_err(|e| ApplicationError::failed("read compressed category tree", e))?;
        meta.insert(
            "uncompressed_sha256".into(),
            json!(hash::sha256_hex(&content)),
        );
        meta.insert(
            "updated".into(),
            json!(Local::now().date_naive().to_string()),
        );

        serialize::write_pretty(&Value::Object(meta), &self.paths.meta_file_path())
            .map_err(|e| ApplicationError::failed("write meta file", e))
    }
}
