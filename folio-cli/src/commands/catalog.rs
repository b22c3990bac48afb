use folio_catalog::{CatalogueStore, VideoRef, load_site_config};
use folio_import::{NewProject, add_project, summarize, validate};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Context;
use crate::{CliError, log_blank};

/// Fields of a manually added project as given on the command line.
pub(crate) struct AddArgs {
    pub title: String,
    pub category: String,
    pub client: Option<String>,
    pub vimeo: Option<String>,
    pub youtube: Option<String>,
}

pub(crate) fn run_add(ctx: &Context, args: AddArgs) -> Result<(), CliError> {
    let store = ctx.store();
    let mut catalogue = store.load()?;

    let video = match (args.vimeo, args.youtube) {
        (Some(id), _) => Some(VideoRef::Vimeo(id)),
        (None, Some(id)) => Some(VideoRef::YouTube(id)),
        (None, None) => None,
    };
    let new = NewProject {
        title: args.title,
        category: args.category,
        client: args.client,
        video,
    };
    let id = add_project(&mut catalogue, new, chrono::Local::now().naive_local())?;
    store.save(&catalogue)?;

    log::info!(
        "{} Added {} to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        id.if_supports_color(Stdout, |t| t.cyan()),
        store.path().display(),
    );
    Ok(())
}

pub(crate) fn run_stats(ctx: &Context) -> Result<(), CliError> {
    let catalogue = ctx.load_catalogue()?;
    let summary = summarize(&catalogue);

    log::info!(
        "{}",
        "Catalogue Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  File: {}", ctx.settings.layout.catalogue.display());
    log_blank();
    for category in &summary.categories {
        log::info!("  {:<16}{:>6}", category.name, category.count);
    }
    log::info!("  {:<16}{:>6}", "Total", summary.total);
    log_blank();
    log::info!("  With gallery:       {:>6}", summary.with_gallery);
    log::info!("  Missing video:      {:>6}", summary.missing_video.len());
    log::info!("  Missing thumbnail:  {:>6}", summary.missing_thumbnail.len());
    log::info!("  Missing client:     {:>6}", summary.missing_client.len());

    for (label, ids) in [
        ("Missing video", &summary.missing_video),
        ("Missing thumbnail", &summary.missing_thumbnail),
    ] {
        if ids.is_empty() {
            continue;
        }
        log_blank();
        log::info!("{}:", label.if_supports_color(Stdout, |t| t.dimmed()));
        for id in ids {
            log::info!("  {}", id);
        }
    }
    Ok(())
}

/// Returns [`CliError::Invalid`] when any problem is found.
pub(crate) fn run_validate(ctx: &Context) -> Result<(), CliError> {
    let catalogue = ctx.load_catalogue()?;
    let problems = validate(&catalogue, &ctx.settings.layout);

    if problems.is_empty() {
        log::info!(
            "{} {} projects, no problems found",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            catalogue.projects.len(),
        );
        return Ok(());
    }
    for problem in &problems {
        log::warn!(
            "  {} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.bright_red()),
            problem,
        );
    }
    Err(CliError::Invalid(problems.len()))
}

pub(crate) fn run_info(ctx: &Context) -> Result<(), CliError> {
    let path = &ctx.settings.layout.site_config;
    let Some(site) = load_site_config(path)? else {
        log::warn!("No site configuration at {}", path.display());
        return Ok(());
    };

    log::info!(
        "{}",
        site.title
            .as_deref()
            .unwrap_or("(untitled site)")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    if let Some(tagline) = &site.tagline {
        log::info!("  {}", tagline.if_supports_color(Stdout, |t| t.dimmed()));
    }
    log_blank();
    for (label, value) in [
        ("Domain", &site.domain),
        ("Email", &site.email),
        ("Location", &site.location),
    ] {
        if let Some(value) = value {
            log::info!("  {:<10}{}", label, value);
        }
    }
    if !site.social.is_empty() {
        log_blank();
        log::info!("  Social:");
        for (network, url) in &site.social {
            log::info!("    {:<10}{}", network, url);
        }
    }
    if let Some(seo) = &site.seo {
        if let Some(description) = &seo.description {
            log_blank();
            log::info!("  SEO: {}", description);
        }
    }
    Ok(())
}
