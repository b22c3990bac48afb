//! Asset downloads: skip-if-exists, manual redirects, no partial files.

use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use reqwest::header::LOCATION;
use url::Url;

use crate::client::HttpClient;
use crate::error::DownloadError;

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { bytes: u64 },
    /// The destination already existed; nothing was requested.
    Skipped,
}

pub trait AssetDownloader {
    /// Store `url` at `dest`, unless `dest` already exists.
    fn download(
        &self,
        url: &str,
        dest: &Path,
    ) -> impl Future<Output = Result<DownloadOutcome, DownloadError>> + Send;
}

impl AssetDownloader for HttpClient {
    async fn download(&self, url: &str, dest: &Path) -> Result<DownloadOutcome, DownloadError> {
        if dest.exists() {
            log::debug!("Skipping (exists): {}", dest.display());
            return Ok(DownloadOutcome::Skipped);
        }

        let mut current = Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let mut hops = 0;
        let resp = loop {
            let resp = self.assets().get(current.clone()).send().await?;
            let status = resp.status();
            if is_redirect(status) {
                if hops == MAX_REDIRECTS {
                    return Err(DownloadError::TooManyRedirects {
                        url: url.to_string(),
                        hops,
                    });
                }
                let location = resp
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| DownloadError::MissingLocation(current.to_string()))?;
                let next = current.join(location).map_err(|e| DownloadError::InvalidUrl {
                    url: location.to_string(),
                    reason: e.to_string(),
                })?;
                log::debug!("Redirect {status}: {current} -> {next}");
                current = next;
                hops += 1;
                continue;
            }
            if !status.is_success() {
                return Err(DownloadError::Status {
                    status: status.as_u16(),
                    url: current.to_string(),
                });
            }
            break resp;
        };

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let part = part_path(dest);
        match write_body(resp, &part).await {
            Ok(bytes) => {
                std::fs::rename(&part, dest).map_err(|e| {
                    let _ = std::fs::remove_file(&part);
                    io_error(dest, e)
                })?;
                Ok(DownloadOutcome::Downloaded { bytes })
            }
            Err(e) => {
                let _ = std::fs::remove_file(&part);
                Err(e)
            }
        }
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

async fn write_body(mut resp: reqwest::Response, part: &Path) -> Result<u64, DownloadError> {
    let mut file = std::fs::File::create(part).map_err(|e| io_error(part, e))?;
    let mut bytes = 0u64;
    while let Some(chunk) = resp.chunk().await? {
        file.write_all(&chunk).map_err(|e| io_error(part, e))?;
        bytes += chunk.len() as u64;
    }
    file.flush().map_err(|e| io_error(part, e))?;
    Ok(bytes)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

fn io_error(path: &Path, source: std::io::Error) -> DownloadError {
    DownloadError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// File extension (with the dot) of the URL's last path segment, or `.jpg`.
pub fn asset_extension(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.split(['?', '#']).next().unwrap_or_default().to_string());
    let file = path.rsplit('/').next().unwrap_or_default();
    match file.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{ext}")
        }
        _ => ".jpg".to_string(),
    }
}
