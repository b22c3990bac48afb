//! Portfolio catalogue data model, JSON persistence, and reconciliation tables.
//!
//! This crate defines the catalogue schema (categories and projects) without
//! any network dependencies. The catalogue is persisted as a single JSON
//! document through the [`CatalogueStore`] repository trait; the lookup
//! tables used to repair scraped data live in YAML and are loaded as a
//! [`RuleSet`].

pub mod layout;
pub mod rules;
pub mod site;
pub mod slug;
pub mod store;
pub mod types;

pub use layout::SiteLayout;
pub use rules::{CommercialEntry, KnownThumbnail, RuleSet, RulesError};
pub use site::{SiteConfig, load_site_config};
pub use slug::slugify;
pub use store::{CatalogueStore, JsonFileStore, MemoryStore, StoreError};
pub use types::*;
