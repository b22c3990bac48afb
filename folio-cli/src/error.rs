use thiserror::Error;

use crate::settings::SettingsError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Catalogue load or save failed
    #[error("{0}")]
    Store(#[from] folio_catalog::StoreError),

    /// Rule tables could not be read
    #[error("Rules error: {0}")]
    Rules(#[from] folio_catalog::RulesError),

    /// Settings file or environment override is invalid
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// A driver aborted
    #[error("{0}")]
    Driver(#[from] folio_import::DriverError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] folio_scraper::FetchError),

    /// Manual add rejected
    #[error("Cannot add project: {0}")]
    Add(#[from] folio_import::AddError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Validation found problems
    #[error("{0} problem(s) found")]
    Invalid(usize),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
