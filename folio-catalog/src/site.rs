//! Site-wide configuration (`data/site.json`).
//!
//! Consumed by the external build step; loaded here only so the CLI can
//! show what the build will see.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub social: BTreeMap<String, String>,
    #[serde(default)]
    pub seo: Option<SeoDefaults>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDefaults {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
}

/// Load the site configuration. A missing file yields `Ok(None)`.
pub fn load_site_config(path: &Path) -> Result<Option<SiteConfig>, StoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::Io {
                path: path.display().to_string(),
                source: e,
            });
        }
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| StoreError::Json {
            path: path.display().to_string(),
            source: e,
        })
}
