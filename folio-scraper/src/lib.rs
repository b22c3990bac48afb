//! Network side of the ingestion pipeline: page fetching, HTML extraction
//! and asset downloads.
//!
//! Fetching and downloading sit behind the [`PageFetcher`] and
//! [`AssetDownloader`] traits so drivers can run against stub pages.
//! Extraction is pure: an ordered list of [`Strategy`] values per field,
//! combined by [`first_success`].

pub mod client;
pub mod error;
pub mod extract;
pub mod media;

pub use client::{
    ClientOptions, DEFAULT_ORIGIN, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpClient, PageFetcher,
};
pub use error::{DownloadError, FetchError};
pub use extract::{Extracted, ImageRules, Page, Strategy, first_success};
pub use media::{AssetDownloader, DownloadOutcome, MAX_REDIRECTS, asset_extension};
