//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Build and repair a portfolio video catalogue", long_about = None)]
pub(crate) struct Cli {
    /// Site root containing data/, images/ and rules/ (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Settings file to use instead of <root>/folio.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every driver command.
#[derive(Args, Clone, Copy)]
pub(crate) struct RunArgs {
    /// Show what would change without downloading or saving
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scrape category listings and project pages into the catalogue
    Scrape {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Fill missing client and production credits from project pages
    Metadata {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Fill missing video ids and thumbnails from project pages
    FixMissing {
        /// Only these project ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Download gallery images for colour grading projects
    Gallery {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Download thumbnails from the known-thumbnail table
    Thumbnails {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Apply reconciliation tables to the catalogue (no network)
    Cleanup {
        #[arg(value_enum, default_value = "all")]
        target: CleanupTarget,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Import the commercial projects listed in rules/commercial.yaml
    ImportCommercial {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Add a project by hand
    Add {
        /// Project title; the id is derived from it
        title: String,

        /// Category id (commercial, branded, vertical, colour-grading)
        #[arg(short, long)]
        category: String,

        /// Client name
        #[arg(long)]
        client: Option<String>,

        /// Vimeo video id
        #[arg(long, conflicts_with = "youtube")]
        vimeo: Option<String>,

        /// YouTube video id
        #[arg(long)]
        youtube: Option<String>,
    },

    /// Show catalogue statistics
    Stats,

    /// Check ids, categories and image paths; exits non-zero on problems
    Validate,

    /// Show the site configuration from data/site.json
    Info,

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CleanupTarget {
    /// Canonical titles (and clients)
    Titles,
    /// Run-together credits and canonical clients
    Metadata,
    /// Titles, then metadata
    All,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where each value came from
    Show,

    /// Print the settings file path
    Path,
}
