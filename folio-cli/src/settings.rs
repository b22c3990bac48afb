//! Run settings: origin, user agent, pacing, image rules and directory layout.
//!
//! Each value resolves as environment variable > settings file > built-in
//! default. The settings file is `folio.toml` at the site root, falling back
//! to `~/.config/folio/folio.toml`:
//!
//! ```toml
//! [fetch]
//! origin = "https://www.matthewfregnan.com"
//! user_agent = "Mozilla/5.0 (compatible; asset-extractor/1.0)"
//! delay_ms = 500
//! timeout_secs = 30
//! cdn_marker = "squarespace-cdn"
//!
//! [layout]
//! catalogue = "data/projects.json"
//! images = "images"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_catalog::SiteLayout;
use folio_import::DEFAULT_DELAY;
use folio_scraper::{ClientOptions, DEFAULT_ORIGIN, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ImageRules};
use serde::Deserialize;
use thiserror::Error;

pub(crate) const SETTINGS_FILE: &str = "folio.toml";

const ENV_ORIGIN: &str = "FOLIO_ORIGIN";
const ENV_USER_AGENT: &str = "FOLIO_USER_AGENT";
const ENV_DELAY_MS: &str = "FOLIO_DELAY_MS";

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// TOML settings file format.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    fetch: FetchSection,
    layout: LayoutSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FetchSection {
    origin: Option<String>,
    user_agent: Option<String>,
    delay_ms: Option<u64>,
    timeout_secs: Option<u64>,
    cdn_marker: Option<String>,
}

/// Paths relative to the site root.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LayoutSection {
    catalogue: Option<PathBuf>,
    site_config: Option<PathBuf>,
    images: Option<PathBuf>,
    rules: Option<PathBuf>,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    ConfigFile,
    /// Built-in default value.
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Setting<T> {
    pub value: T,
    pub source: SettingSource,
}

impl<T> Setting<T> {
    fn from_file(file: Option<T>, default: T) -> Self {
        match file {
            Some(value) => Self {
                value,
                source: SettingSource::ConfigFile,
            },
            None => Self {
                value: default,
                source: SettingSource::Default,
            },
        }
    }

    fn from_env_or_file(
        env_value: Option<String>,
        key: &'static str,
        parse: fn(&str) -> Option<T>,
        file: Option<T>,
        default: T,
    ) -> Result<Self, SettingsError> {
        let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) else {
            return Ok(Self::from_file(file, default));
        };
        let value = parse(&raw).ok_or(SettingsError::InvalidValue { key, value: raw })?;
        Ok(Self {
            value,
            source: SettingSource::EnvVar(key),
        })
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// The settings file that was read, if any.
    pub file: Option<PathBuf>,
    pub origin: Setting<String>,
    pub user_agent: Setting<String>,
    pub delay: Setting<Duration>,
    pub timeout: Setting<Duration>,
    pub cdn_marker: Setting<String>,
    pub layout: SiteLayout,
}

impl Settings {
    /// Resolve settings for `root` from the process environment.
    pub(crate) fn load(root: &Path, config: Option<&Path>) -> Result<Self, SettingsError> {
        let file = match config {
            Some(path) => Some(path.to_path_buf()),
            None => find_settings_file(root),
        };
        Self::resolve(root, file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve settings from an explicit file (which must exist when given)
    /// and an environment lookup.
    pub(crate) fn resolve(
        root: &Path,
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let parsed = match file {
            Some(path) => read_settings_file(path)?,
            None => SettingsFile::default(),
        };
        let SettingsFile { fetch, layout } = parsed;

        let origin = Setting::from_env_or_file(
            env(ENV_ORIGIN),
            ENV_ORIGIN,
            |v| Some(v.trim().to_string()),
            fetch.origin,
            DEFAULT_ORIGIN.to_string(),
        )?;
        let user_agent = Setting::from_env_or_file(
            env(ENV_USER_AGENT),
            ENV_USER_AGENT,
            |v| Some(v.to_string()),
            fetch.user_agent,
            DEFAULT_USER_AGENT.to_string(),
        )?;
        let delay = Setting::from_env_or_file(
            env(ENV_DELAY_MS),
            ENV_DELAY_MS,
            |v| v.trim().parse().ok().map(Duration::from_millis),
            fetch.delay_ms.map(Duration::from_millis),
            DEFAULT_DELAY,
        )?;
        let timeout = Setting::from_file(fetch.timeout_secs.map(Duration::from_secs), DEFAULT_TIMEOUT);
        let cdn_marker = Setting::from_file(fetch.cdn_marker, ImageRules::default().cdn_marker);

        let mut site = SiteLayout::new(root);
        if let Some(p) = layout.catalogue {
            site.catalogue = root.join(p);
        }
        if let Some(p) = layout.site_config {
            site.site_config = root.join(p);
        }
        if let Some(p) = layout.images {
            site.images = root.join(p);
        }
        if let Some(p) = layout.rules {
            site.rules = root.join(p);
        }

        Ok(Self {
            file: file.map(Path::to_path_buf),
            origin,
            user_agent,
            delay,
            timeout,
            cdn_marker,
            layout: site,
        })
    }

    pub(crate) fn client_options(&self) -> ClientOptions {
        ClientOptions {
            origin: self.origin.value.clone(),
            user_agent: self.user_agent.value.clone(),
            timeout: self.timeout.value,
        }
    }

    pub(crate) fn image_rules(&self) -> ImageRules {
        ImageRules {
            cdn_marker: self.cdn_marker.value.clone(),
            ..ImageRules::default()
        }
    }
}

/// Per-user settings file: `~/.config/folio/folio.toml`.
pub(crate) fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join(SETTINGS_FILE))
}

/// The settings file in effect for `root`: the site's own, else the user's.
pub(crate) fn find_settings_file(root: &Path) -> Option<PathBuf> {
    let site = root.join(SETTINGS_FILE);
    if site.is_file() {
        return Some(site);
    }
    user_settings_path().filter(|p| p.is_file())
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let parsed = toml::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file_or_env() {
        let settings = Settings::resolve(Path::new("/site"), None, no_env).unwrap();
        assert_eq!(settings.origin.value, DEFAULT_ORIGIN);
        assert_eq!(settings.origin.source, SettingSource::Default);
        assert_eq!(settings.delay.value, DEFAULT_DELAY);
        assert_eq!(settings.timeout.value, DEFAULT_TIMEOUT);
        assert_eq!(settings.image_rules(), ImageRules::default());
        assert_eq!(settings.layout, SiteLayout::new("/site"));
        assert!(settings.file.is_none());
    }

    #[test]
    fn file_values_and_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(
            &path,
            r#"
[fetch]
origin = "https://staging.example.com"
delay_ms = 0
timeout_secs = 5
cdn_marker = "cdn.example.com"

[layout]
images = "public/images"
"#,
        )
        .unwrap();

        let settings = Settings::resolve(dir.path(), Some(&path), no_env).unwrap();
        assert_eq!(settings.origin.value, "https://staging.example.com");
        assert_eq!(settings.origin.source, SettingSource::ConfigFile);
        assert_eq!(settings.user_agent.source, SettingSource::Default);
        assert_eq!(settings.delay.value, Duration::ZERO);
        assert_eq!(settings.timeout.value, Duration::from_secs(5));
        assert_eq!(settings.image_rules().cdn_marker, "cdn.example.com");
        assert_eq!(
            settings.layout.thumbnail_path("branded/x.jpg"),
            dir.path()
                .join("public")
                .join("images")
                .join("thumbnails")
                .join("branded")
                .join("x.jpg")
        );
        assert_eq!(
            settings.layout.catalogue,
            dir.path().join("data").join("projects.json")
        );
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "[fetch]\norigin = \"https://file.example.com\"\ndelay_ms = 900\n")
            .unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_ORIGIN, "https://env.example.com"),
            (ENV_DELAY_MS, "250"),
            (ENV_USER_AGENT, ""),
        ]
        .into_iter()
        .collect();

        let settings = Settings::resolve(dir.path(), Some(&path), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(settings.origin.value, "https://env.example.com");
        assert_eq!(settings.origin.source, SettingSource::EnvVar(ENV_ORIGIN));
        assert_eq!(settings.delay.value, Duration::from_millis(250));
        assert_eq!(settings.user_agent.value, DEFAULT_USER_AGENT);
        assert_eq!(settings.user_agent.source, SettingSource::Default);
    }

    #[test]
    fn bad_delay_is_rejected() {
        let err = Settings::resolve(Path::new("/site"), None, |key| {
            (key == ENV_DELAY_MS).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue { key: ENV_DELAY_MS, ref value } if value == "soon"
        ));
    }

    #[test]
    fn malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "[fetch\norigin = ").unwrap();
        let err = Settings::resolve(dir.path(), Some(&path), no_env).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("folio.toml"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            Settings::resolve(dir.path(), Some(&dir.path().join("nope.toml")), no_env).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn site_file_found_before_user_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "").unwrap();
        assert_eq!(
            find_settings_file(dir.path()),
            Some(dir.path().join(SETTINGS_FILE))
        );
    }

    #[test]
    fn source_display() {
        assert_eq!(SettingSource::EnvVar(ENV_ORIGIN).to_string(), "env $FOLIO_ORIGIN");
        assert_eq!(SettingSource::ConfigFile.to_string(), "config file");
    }
}
