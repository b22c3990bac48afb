//! folio CLI
//!
//! Command-line interface for scraping a portfolio site into its video
//! catalogue and repairing the catalogue afterwards.

mod cli_types;
mod commands;
mod error;
mod progress;
mod settings;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Context;
use commands::catalog::{AddArgs, run_add, run_info, run_stats, run_validate};
use commands::config::{run_config_path, run_config_show};
use commands::drivers::{Driver, run_cleanup, run_driver};
pub(crate) use error::CliError;
use settings::Settings;

/// Log an empty line (keeps `log::info!("")` noise out of call sites).
pub(crate) fn log_blank() {
    log::info!("");
}

/// `-q` shows warnings and errors only, `-v` adds debug output with
/// timestamps. `RUST_LOG` overrides both.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder.target(env_logger::Target::Stdout);
    if !verbose {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let root = cli
        .root
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if let Commands::Config {
        action: ConfigAction::Path,
    } = cli.command
    {
        run_config_path(&root, cli.config.as_deref());
        return;
    }

    let result = Settings::load(&root, cli.config.as_deref())
        .map_err(CliError::from)
        .and_then(|settings| {
            let ctx = Context {
                settings,
                quiet: cli.quiet,
            };
            run(&ctx, cli.command)
        });

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(ctx: &Context, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Scrape { run } => run_driver(ctx, Driver::Scrape, run),
        Commands::Metadata { run } => run_driver(ctx, Driver::Metadata, run),
        Commands::FixMissing { only, run } => run_driver(ctx, Driver::FixMissing(only), run),
        Commands::Gallery { run } => run_driver(ctx, Driver::Gallery, run),
        Commands::Thumbnails { run } => run_driver(ctx, Driver::Thumbnails, run),
        Commands::ImportCommercial { run } => run_driver(ctx, Driver::ImportCommercial, run),
        Commands::Cleanup { target, run } => run_cleanup(ctx, target, run),
        Commands::Add {
            title,
            category,
            client,
            vimeo,
            youtube,
        } => run_add(
            ctx,
            AddArgs {
                title,
                category,
                client,
                vimeo,
                youtube,
            },
        ),
        Commands::Stats => run_stats(ctx),
        Commands::Validate => run_validate(ctx),
        Commands::Info => run_info(ctx),
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => run_config_show(ctx),
                ConfigAction::Path => run_config_path(&ctx.settings.layout.root, None),
            }
            Ok(())
        }
    }
}
