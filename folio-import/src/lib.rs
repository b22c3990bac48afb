//! Ingestion drivers for the portfolio catalogue.
//!
//! This crate owns the pipeline logic: each driver loads the catalogue
//! once, walks its targets through fetch, extract, download and reconcile
//! steps, and saves once. Reconciliation helpers, progress reporting and
//! catalogue reports live alongside.

pub mod drivers;
pub mod manual;
pub mod progress;
pub mod reconcile;
pub mod report;

pub use drivers::{DEFAULT_DELAY, DriverError, DriverOptions, DriverStats, Pipeline};
pub use manual::{AddError, NewProject, add_project};
pub use progress::{DriverProgress, LogProgress, SilentProgress};
pub use reconcile::{
    clean_client, clean_production, fill_client, fill_production, fill_title, fill_video,
};
pub use report::{CatalogueSummary, Problem, summarize, validate};
