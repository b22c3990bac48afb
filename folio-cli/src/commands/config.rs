use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Context;
use crate::log_blank;
use crate::settings::{SETTINGS_FILE, SettingSource, find_settings_file};

/// Show resolved settings and their sources.
pub(crate) fn run_config_show(ctx: &Context) {
    let settings = &ctx.settings;

    log::info!(
        "{}",
        "Folio Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log_blank();
    match &settings.file {
        Some(p) => log::info!(
            "  Settings file: {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!(
            "  Settings file: {}",
            "(none, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    log_blank();

    let fields: [(&str, String, &SettingSource); 5] = [
        ("origin", settings.origin.value.clone(), &settings.origin.source),
        (
            "user_agent",
            settings.user_agent.value.clone(),
            &settings.user_agent.source,
        ),
        (
            "delay_ms",
            settings.delay.value.as_millis().to_string(),
            &settings.delay.source,
        ),
        (
            "timeout_secs",
            settings.timeout.value.as_secs().to_string(),
            &settings.timeout.source,
        ),
        (
            "cdn_marker",
            settings.cdn_marker.value.clone(),
            &settings.cdn_marker.source,
        ),
    ];
    for (name, value, source) in fields {
        log::info!(
            "  {:<14}{} {}",
            name,
            value,
            format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let layout = &settings.layout;
    log_blank();
    log::info!("  {:<14}{}", "root", layout.root.display());
    log::info!("  {:<14}{}", "catalogue", layout.catalogue.display());
    log::info!("  {:<14}{}", "site_config", layout.site_config.display());
    log::info!("  {:<14}{}", "images", layout.images.display());
    log::info!("  {:<14}{}", "rules", layout.rules.display());
}

/// Print the settings file path: the one in effect, else where the site's
/// own file would go.
pub(crate) fn run_config_path(root: &Path, config: Option<&Path>) {
    let path = config
        .map(Path::to_path_buf)
        .or_else(|| find_settings_file(root))
        .unwrap_or_else(|| root.join(SETTINGS_FILE));
    log::info!("{}", path.display());
}
