//! Pipeline drivers, one per ingestion concern.
//!
//! Every driver follows the same shape: load the catalogue once, walk its
//! targets one at a time (pausing between network-bound targets), report one
//! line per target, count failures instead of aborting, and save exactly
//! once at the end. Re-runs are safe: assets already on disk are skipped and
//! fields are only ever filled while unset.

mod cleanup;
mod commercial;
mod fix_missing;
mod gallery;
mod metadata;
mod scrape;
mod thumbnails;

use std::fmt;
use std::path::Path;
use std::time::Duration;

use folio_catalog::{Catalogue, CatalogueStore, RuleSet, SiteLayout, StoreError};
use folio_scraper::{
    AssetDownloader, DownloadOutcome, ImageRules, PageFetcher, asset_extension,
};
use thiserror::Error;

use crate::progress::DriverProgress;

/// Pause between network-bound targets.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// The only errors a driver returns. Per-target failures are reported
/// through [`DriverProgress`] and counted in [`DriverStats::failed`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Catalogue store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub delay: Duration,
    /// Run every step except downloads and the final save.
    pub dry_run: bool,
    pub image_rules: ImageRules,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            dry_run: false,
            image_rules: ImageRules::default(),
        }
    }
}

/// Statistics from one driver run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DriverStats {
    /// Targets worked on.
    pub processed: usize,
    /// Existing projects with at least one field changed.
    pub updated: usize,
    /// Targets left alone because there was nothing to do.
    pub skipped: usize,
    /// Page fetches and asset downloads that errored.
    pub failed: usize,
    /// Assets written to disk (skips not included).
    pub downloaded: usize,
    /// New projects inserted.
    pub added: usize,
}

impl fmt::Display for DriverStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} updated, {} added, {} skipped, {} failed, {} downloaded",
            self.processed, self.updated, self.added, self.skipped, self.failed, self.downloaded
        )
    }
}

/// Everything a driver needs, injected.
pub struct Pipeline<'a, S, F, D> {
    pub store: &'a S,
    pub fetcher: &'a F,
    pub downloader: &'a D,
    pub rules: &'a RuleSet,
    pub layout: &'a SiteLayout,
    pub options: DriverOptions,
    pub progress: &'a dyn DriverProgress,
}

impl<S, F, D> Pipeline<'_, S, F, D>
where
    S: CatalogueStore,
    F: PageFetcher,
    D: AssetDownloader,
{
    fn load(&self) -> Result<Catalogue, DriverError> {
        Ok(self.store.load()?)
    }

    /// Save once and report the run.
    fn finish(&self, catalogue: &Catalogue, stats: &DriverStats, label: &str) -> Result<(), DriverError> {
        if self.options.dry_run {
            self.progress
                .on_complete(&format!("{label} (dry run, catalogue not saved): {stats}"));
            return Ok(());
        }
        self.store.save(catalogue)?;
        self.progress.on_complete(&format!("{label}: {stats}"));
        Ok(())
    }

    async fn pause(&self) {
        if !self.options.delay.is_zero() {
            tokio::time::sleep(self.options.delay).await;
        }
    }

    /// Fetch a page, reporting and counting a failure as `None`.
    async fn fetch_page(&self, id: &str, path: &str, stats: &mut DriverStats) -> Option<String> {
        match self.fetcher.fetch(path).await {
            Ok(html) => Some(html),
            Err(e) => {
                stats.failed += 1;
                self.progress.on_failure(id, &format!("fetch {path}: {e}"));
                None
            }
        }
    }

    /// Download an asset. `true` when the file is (or, in a dry run, would
    /// be) on disk afterwards.
    async fn store_asset(&self, id: &str, url: &str, dest: &Path, stats: &mut DriverStats) -> bool {
        if self.options.dry_run {
            self.progress
                .on_update(id, &format!("would download {url} -> {}", dest.display()));
            return true;
        }
        match self.downloader.download(url, dest).await {
            Ok(DownloadOutcome::Downloaded { bytes }) => {
                stats.downloaded += 1;
                self.progress
                    .on_update(id, &format!("downloaded {} ({bytes} bytes)", file_name(dest)));
                true
            }
            Ok(DownloadOutcome::Skipped) => {
                self.progress
                    .on_skip(id, &format!("{} already exists", file_name(dest)));
                true
            }
            Err(e) => {
                stats.failed += 1;
                self.progress.on_failure(id, &format!("download {url}: {e}"));
                false
            }
        }
    }
}

/// Catalogue value for a thumbnail: `<category slug>/<name><ext>`.
fn thumbnail_rel(catalogue: &Catalogue, category: &str, name: &str, url: &str) -> String {
    format!(
        "{}/{}{}",
        catalogue.category_slug(category),
        name,
        asset_extension(url)
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
