//! In-memory stand-ins for the network side of the pipeline.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use folio_catalog::{Catalogue, MemoryStore, RuleSet, SiteLayout};
use folio_import::{DriverOptions, Pipeline, SilentProgress};
use folio_scraper::{AssetDownloader, DownloadError, DownloadOutcome, FetchError, PageFetcher};
use tempfile::TempDir;

/// Serves fixed HTML per path; anything else is a 404.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with_page(mut self, path: &str, html: &str) -> Self {
        self.pages.insert(path.to_string(), html.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl PageFetcher for StubFetcher {
    async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(target.to_string());
        self.pages
            .get(target)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: target.to_string(),
            })
    }
}

/// Writes canned bytes per URL, honouring skip-if-exists; unknown URLs fail.
#[derive(Default)]
pub struct StubDownloader {
    assets: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StubDownloader {
    pub fn with_asset(mut self, url: &str, bytes: &[u8]) -> Self {
        self.assets.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl AssetDownloader for StubDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<DownloadOutcome, DownloadError> {
        if dest.exists() {
            return Ok(DownloadOutcome::Skipped);
        }
        self.requests.lock().unwrap().push(url.to_string());
        let Some(bytes) = self.assets.get(url) else {
            return Err(DownloadError::Status {
                status: 500,
                url: url.to_string(),
            });
        };
        let io = |source| DownloadError::Io {
            path: dest.display().to_string(),
            source,
        };
        std::fs::create_dir_all(dest.parent().unwrap()).map_err(io)?;
        std::fs::write(dest, bytes).map_err(io)?;
        Ok(DownloadOutcome::Downloaded {
            bytes: bytes.len() as u64,
        })
    }
}

/// A site root in a temp dir plus stubs for every pipeline collaborator.
pub struct Harness {
    pub store: MemoryStore,
    pub fetcher: StubFetcher,
    pub downloader: StubDownloader,
    pub rules: RuleSet,
    pub layout: SiteLayout,
    pub dry_run: bool,
    _root: TempDir,
}

impl Harness {
    pub fn new(catalogue: Option<Catalogue>) -> Self {
        let root = TempDir::new().unwrap();
        Self {
            store: catalogue.map(MemoryStore::new).unwrap_or_else(MemoryStore::empty),
            fetcher: StubFetcher::default(),
            downloader: StubDownloader::default(),
            rules: RuleSet::default(),
            layout: SiteLayout::new(root.path()),
            dry_run: false,
            _root: root,
        }
    }

    pub fn pipeline(&self) -> Pipeline<'_, MemoryStore, StubFetcher, StubDownloader> {
        Pipeline {
            store: &self.store,
            fetcher: &self.fetcher,
            downloader: &self.downloader,
            rules: &self.rules,
            layout: &self.layout,
            options: DriverOptions {
                delay: Duration::ZERO,
                dry_run: self.dry_run,
                ..DriverOptions::default()
            },
            progress: &SilentProgress,
        }
    }

    pub fn saved(&self) -> Catalogue {
        self.store.snapshot().expect("catalogue saved")
    }
}
