use std::io::IsTerminal;

use folio_catalog::{JsonFileStore, RuleSet};
use folio_import::{DriverOptions, DriverProgress, DriverStats, Pipeline};
use folio_scraper::HttpClient;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Context;
use crate::CliError;
use crate::cli_types::{CleanupTarget, RunArgs};
use crate::progress::driver_progress;

/// Network-bound drivers.
pub(crate) enum Driver {
    Scrape,
    Metadata,
    FixMissing(Vec<String>),
    Gallery,
    Thumbnails,
    ImportCommercial,
}

/// Collaborators owned for the length of one command.
struct DriverSetup {
    store: JsonFileStore,
    client: HttpClient,
    rules: RuleSet,
    progress: Box<dyn DriverProgress>,
    options: DriverOptions,
}

impl DriverSetup {
    fn new(ctx: &Context, run: RunArgs) -> Result<Self, CliError> {
        let settings = &ctx.settings;
        let rules = RuleSet::load(&settings.layout.rules)?;
        let client = HttpClient::new(&settings.client_options())?;
        log::debug!("Origin {}", client.origin());

        if run.dry_run {
            log::info!(
                "{}",
                "Dry run: nothing will be downloaded or saved"
                    .if_supports_color(Stdout, |t| t.yellow()),
            );
        }

        Ok(Self {
            store: ctx.store(),
            client,
            rules,
            progress: driver_progress(ctx.quiet, std::io::stdout().is_terminal()),
            options: DriverOptions {
                delay: settings.delay.value,
                dry_run: run.dry_run,
                image_rules: settings.image_rules(),
            },
        })
    }

    fn pipeline<'a>(
        &'a self,
        ctx: &'a Context,
    ) -> Pipeline<'a, JsonFileStore, HttpClient, HttpClient> {
        Pipeline {
            store: &self.store,
            fetcher: &self.client,
            downloader: &self.client,
            rules: &self.rules,
            layout: &ctx.settings.layout,
            options: self.options.clone(),
            progress: self.progress.as_ref(),
        }
    }
}

pub(crate) fn run_driver(ctx: &Context, driver: Driver, run: RunArgs) -> Result<(), CliError> {
    let setup = DriverSetup::new(ctx, run)?;
    let pipeline = setup.pipeline(ctx);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;

    let stats = rt.block_on(async {
        match driver {
            Driver::Scrape => pipeline.scrape().await,
            Driver::Metadata => pipeline.metadata().await,
            Driver::FixMissing(only) => pipeline.fix_missing(&only).await,
            Driver::Gallery => pipeline.gallery().await,
            Driver::Thumbnails => pipeline.thumbnails().await,
            Driver::ImportCommercial => pipeline.import_commercial().await,
        }
    })?;
    report_failures(&stats);
    Ok(())
}

pub(crate) fn run_cleanup(ctx: &Context, target: CleanupTarget, run: RunArgs) -> Result<(), CliError> {
    let setup = DriverSetup::new(ctx, run)?;
    let pipeline = setup.pipeline(ctx);

    if matches!(target, CleanupTarget::Titles | CleanupTarget::All) {
        report_failures(&pipeline.cleanup_titles()?);
    }
    if matches!(target, CleanupTarget::Metadata | CleanupTarget::All) {
        report_failures(&pipeline.cleanup_metadata()?);
    }
    Ok(())
}

fn report_failures(stats: &DriverStats) {
    if stats.failed > 0 {
        log::warn!(
            "{} {} step(s) failed; re-run to retry them",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.failed,
        );
    }
}
