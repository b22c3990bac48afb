//! Reconciliation tables: curated, id-keyed data used to repair scraped fields.
//!
//! The tables ship embedded in the binary (the `rules/` directory of this
//! crate) and can be overridden per table from a site's own `rules/`
//! directory, so data-only changes need no rebuild.
//!
//! ```text
//! rules/
//!   titles.yaml                 id -> canonical title
//!   clients.yaml                id -> canonical client
//!   page-paths.yaml             id -> page path on the origin
//!   production-companies.yaml   known production company names
//!   commercial.yaml             commercial projects to import
//!   thumbnails.yaml             known thumbnail URLs
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slug::slugify;
use crate::types::{self, Project};

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// A commercial project listed on the origin's root level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommercialEntry {
    /// Page path on the origin (e.g. `/wic-tvc`).
    pub path: String,
    pub title: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    #[serde(default)]
    pub client: Option<String>,
}

/// A thumbnail URL known for a project whose page yields no usable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownThumbnail {
    pub id: String,
    pub category: String,
    pub url: String,
}

/// All reconciliation tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub titles: BTreeMap<String, String>,
    pub clients: BTreeMap<String, String>,
    pub page_paths: BTreeMap<String, String>,
    pub production_companies: Vec<String>,
    pub commercial: Vec<CommercialEntry>,
    pub thumbnails: Vec<KnownThumbnail>,
}

const TITLES: &str = "titles.yaml";
const CLIENTS: &str = "clients.yaml";
const PAGE_PATHS: &str = "page-paths.yaml";
const PRODUCTION_COMPANIES: &str = "production-companies.yaml";
const COMMERCIAL: &str = "commercial.yaml";
const THUMBNAILS: &str = "thumbnails.yaml";

const BUILTIN_TITLES: &str = include_str!("../rules/titles.yaml");
const BUILTIN_CLIENTS: &str = include_str!("../rules/clients.yaml");
const BUILTIN_PAGE_PATHS: &str = include_str!("../rules/page-paths.yaml");
const BUILTIN_PRODUCTION_COMPANIES: &str = include_str!("../rules/production-companies.yaml");
const BUILTIN_COMMERCIAL: &str = include_str!("../rules/commercial.yaml");
const BUILTIN_THUMBNAILS: &str = include_str!("../rules/thumbnails.yaml");

impl RuleSet {
    /// The tables embedded at compile time.
    pub fn builtin() -> Result<Self, RulesError> {
        Ok(Self {
            titles: parse_builtin(TITLES, BUILTIN_TITLES)?,
            clients: parse_builtin(CLIENTS, BUILTIN_CLIENTS)?,
            page_paths: parse_builtin(PAGE_PATHS, BUILTIN_PAGE_PATHS)?,
            production_companies: parse_builtin(PRODUCTION_COMPANIES, BUILTIN_PRODUCTION_COMPANIES)?,
            commercial: parse_builtin(COMMERCIAL, BUILTIN_COMMERCIAL)?,
            thumbnails: parse_builtin(THUMBNAILS, BUILTIN_THUMBNAILS)?,
        })
    }

    /// Start from the builtin tables and replace each one that has a file in `dir`.
    ///
    /// A missing directory is not an error: the builtin set is returned.
    pub fn load(dir: &Path) -> Result<Self, RulesError> {
        let mut rules = Self::builtin()?;
        if !dir.exists() {
            return Ok(rules);
        }
        if !dir.is_dir() {
            return Err(RulesError::NotADirectory(dir.display().to_string()));
        }

        if let Some(t) = load_table(dir, TITLES)? {
            rules.titles = t;
        }
        if let Some(t) = load_table(dir, CLIENTS)? {
            rules.clients = t;
        }
        if let Some(t) = load_table(dir, PAGE_PATHS)? {
            rules.page_paths = t;
        }
        if let Some(t) = load_table(dir, PRODUCTION_COMPANIES)? {
            rules.production_companies = t;
        }
        if let Some(t) = load_table(dir, COMMERCIAL)? {
            rules.commercial = t;
        }
        if let Some(t) = load_table(dir, THUMBNAILS)? {
            rules.thumbnails = t;
        }
        Ok(rules)
    }

    /// Path of a project's page on the origin.
    ///
    /// `page-paths.yaml` wins. Commercial projects live at the site root, so
    /// their path comes from the commercial table entry whose title slugs to
    /// the project's id; with no such entry there is no page to visit and
    /// `None` is returned. Everything else is `/<category>/<id>`.
    pub fn page_path(&self, project: &Project) -> Option<String> {
        if let Some(path) = self.page_paths.get(&project.id) {
            return Some(path.clone());
        }
        if project.category == types::COMMERCIAL {
            return self.commercial_entry(&project.id).map(|e| e.path.clone());
        }
        Some(format!("/{}/{}", project.category, project.id))
    }

    /// The commercial table entry imported under `id`.
    pub fn commercial_entry(&self, id: &str) -> Option<&CommercialEntry> {
        self.commercial.iter().find(|e| slugify(&e.title) == id)
    }
}

fn parse_builtin<T: DeserializeOwned>(name: &str, contents: &str) -> Result<T, RulesError> {
    serde_yml::from_str(contents).map_err(|e| RulesError::Parse {
        path: format!("<builtin>/{name}"),
        source: e,
    })
}

/// Load one table file from `dir`, or `None` when the file is absent.
fn load_table<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>, RulesError> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| RulesError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let table = serde_yml::from_str(&contents).map_err(|e| RulesError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Loaded rule table {}", path.display());
    Ok(Some(table))
}
