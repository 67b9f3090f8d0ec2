//! Per-language orchestration: the fixed pipeline sequence and the batch
//! loop over all configured languages.

use std::fs;
use std::time::Instant;

use tracing::{error, info, instrument};

use crate::application::data_dir::DataDir;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::fetch::Fetcher;

/// Run the full pipeline for one language: fetch raw, trim, compress,
/// write meta. Steps run in this order and stop at the first failure.
#[instrument(level = "info", skip(settings, fetcher))]
pub fn update(settings: &Settings, fetcher: &dyn Fetcher, language: &str) -> ApplicationResult<()> {
    let data_dir = DataDir::new(language, &settings.data_dir);

    data_dir.save_raw_category_tree(fetcher)?;
    data_dir.save_trimmed_category_tree(settings.pages_percentile, settings.max_depth)?;
    data_dir.save_compressed_category_tree()?;
    data_dir.save_meta_file()?;

    Ok(())
}

/// Rebuild the dataset for every configured language.
///
/// The output directory is recreated from scratch. A failure in one
/// language is logged with its elapsed time and the batch continues; the
/// failed language is simply absent from this run's output.
pub fn update_all(settings: &Settings, fetcher: &dyn Fetcher) -> ApplicationResult<()> {
    if settings.data_dir.exists() {
        fs::remove_dir_all(&settings.data_dir)
            .map_err(|e| ApplicationError::failed("clear data directory", e))?;
    }
    fs::create_dir_all(&settings.data_dir)
        .map_err(|e| ApplicationError::failed("create data directory", e))?;

    for language in &settings.languages {
        let started = Instant::now();
        info!("starting {}wiki", language);

        match update(settings, fetcher, language) {
            Ok(()) => info!("finished {}wiki in {:.1?}", language, started.elapsed()),
            Err(e) => error!(
                "{}wiki failed after {:.1?}: {:#}",
                language,
                started.elapsed(),
                anyhow::Error::from(e)
            ),
        }
    }

    Ok(())
}
