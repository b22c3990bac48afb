pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod drivers;

use folio_catalog::{Catalogue, CatalogueStore, JsonFileStore};

use crate::CliError;
use crate::settings::Settings;

/// Resolved state shared by every command.
pub(crate) struct Context {
    pub settings: Settings,
    pub quiet: bool,
}

impl Context {
    pub(crate) fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.settings.layout.catalogue)
    }

    pub(crate) fn load_catalogue(&self) -> Result<Catalogue, CliError> {
        Ok(self.store().load()?)
    }
}
