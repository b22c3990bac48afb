//! Field repair and the fill-only-unset rule.
//!
//! Scraped credit lines often run together ("Milk Video Director: Jane"),
//! so values are cleaned by cutting at the first trailing role label. The
//! `fill_*` helpers are the only way drivers write metadata: each writes
//! only when the current value is unset per [`folio_catalog::is_unset`].

use std::sync::LazyLock;

use folio_catalog::{Project, VideoRef};
use regex::Regex;

static PRODUCTION_TRAILERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)Director.*$",
        r"(?i)Producer.*$",
        r"(?i)DOP.*$",
        r"(?i)Editor.*$",
        r"(?i)Production.*$",
    ])
});

static CLIENT_TRAILERS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"(?i)Production.*$", r"(?i)Director.*$"]));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static trailer pattern"))
        .collect()
}

fn strip_trailers(value: &str, trailers: &[Regex]) -> Option<String> {
    let mut cleaned = value.to_string();
    for re in trailers {
        cleaned = re.replace(&cleaned, "").into_owned();
    }
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Canonical production company for a scraped credit.
///
/// A known company name anywhere in the value wins outright; otherwise
/// trailing `Director`, `Producer`, `DOP`, `Editor` and `Production`
/// fragments are cut off. An empty result is `None`.
pub fn clean_production(value: &str, companies: &[String]) -> Option<String> {
    if let Some(company) = companies
        .iter()
        .find(|c| !c.is_empty() && value.contains(c.as_str()))
    {
        return Some(company.clone());
    }
    strip_trailers(value, &PRODUCTION_TRAILERS)
}

/// Client name with trailing `Production` and `Director` fragments cut off.
pub fn clean_client(value: &str) -> Option<String> {
    strip_trailers(value, &CLIENT_TRAILERS)
}

fn usable(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Set the client unless a real one (non-blank, not the title) is present.
pub fn fill_client(project: &mut Project, client: &str) -> bool {
    let Some(client) = usable(client) else {
        return false;
    };
    if !project.client_is_unset() || project.client.as_deref() == Some(client.as_str()) {
        return false;
    }
    project.client = Some(client);
    true
}

pub fn fill_production(project: &mut Project, production: &str) -> bool {
    let Some(production) = usable(production) else {
        return false;
    };
    if !project.production_is_unset() {
        return false;
    }
    project.production = Some(production);
    true
}

/// Set the title when the current one is blank or just restates the id.
pub fn fill_title(project: &mut Project, title: &str) -> bool {
    let Some(title) = usable(title) else {
        return false;
    };
    if !project.title_is_unset() || project.title.as_deref() == Some(title.as_str()) {
        return false;
    }
    project.title = Some(title);
    true
}

pub fn fill_video(project: &mut Project, video: VideoRef) -> bool {
    if !project.video_is_unset() || video.id().trim().is_empty() {
        return false;
    }
    project.set_video(video);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_catalog::{BRANDED, COMMERCIAL};

    fn companies() -> Vec<String> {
        ["ThinkHQ", "Elastic", "Milk Video", "Studio Supernatural"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn production_prefers_known_company() {
        assert_eq!(
            clean_production("Milk Video Director: Jane", &companies()).as_deref(),
            Some("Milk Video")
        );
        assert_eq!(
            clean_production("Production: ThinkHQProducer Sam", &companies()).as_deref(),
            Some("ThinkHQ")
        );
    }

    #[test]
    fn production_strips_trailing_roles() {
        assert_eq!(
            clean_production("Some Studio Director John", &companies()).as_deref(),
            Some("Some Studio")
        );
        assert_eq!(
            clean_production("Northside Films DOP: Kim Editor: Matt", &companies()).as_deref(),
            Some("Northside Films")
        );
        assert_eq!(clean_production("Director: Jane", &companies()), None);
        assert_eq!(clean_production("   ", &companies()), None);
    }

    #[test]
    fn client_strips_trailing_roles() {
        assert_eq!(clean_client("Oporto Director: X").as_deref(), Some("Oporto"));
        assert_eq!(
            clean_client("Yarra Valley Water Production: Elastic").as_deref(),
            Some("Yarra Valley Water")
        );
        assert_eq!(clean_client("Acme Co").as_deref(), Some("Acme Co"));
        assert_eq!(clean_client("production company"), None);
    }

    #[test]
    fn client_fill_respects_real_values() {
        let mut project = Project::new("watercare", "Watercare", COMMERCIAL);
        project.client = Some("Acme Co".to_string());
        assert!(!fill_client(&mut project, "Yarra Valley Water"));
        assert_eq!(project.client.as_deref(), Some("Acme Co"));
    }

    #[test]
    fn client_fill_replaces_title_placeholder() {
        let mut project = Project::new("watercare", "Watercare", COMMERCIAL);
        project.client = Some("Watercare".to_string());
        assert!(fill_client(&mut project, "Yarra Valley Water"));
        assert_eq!(project.client.as_deref(), Some("Yarra Valley Water"));
        assert!(!fill_client(&mut project, "Someone Else"));
    }

    #[test]
    fn blank_values_never_fill() {
        let mut project = Project::new("x", "X", BRANDED);
        assert!(!fill_client(&mut project, "  "));
        assert!(!fill_production(&mut project, ""));
        assert!(fill_production(&mut project, " Elastic "));
        assert_eq!(project.production.as_deref(), Some("Elastic"));
    }

    #[test]
    fn title_fill_only_replaces_id_titles() {
        let mut project = Project::new("mud-to-marle", "mud-to-marle", BRANDED);
        assert!(fill_title(&mut project, "Mud to Marle"));
        assert_eq!(project.title.as_deref(), Some("Mud to Marle"));
        assert!(!fill_title(&mut project, "MUD TO MARLE"));

        let mut named = Project::new("heisi", "Heisi: A Short Film", BRANDED);
        assert!(!fill_title(&mut named, "Heisi"));
    }

    #[test]
    fn video_fill_keeps_existing_id() {
        let mut project = Project::new("x", "X", COMMERCIAL);
        assert!(fill_video(&mut project, VideoRef::Vimeo("123456".to_string())));
        assert!(!fill_video(&mut project, VideoRef::Vimeo("999".to_string())));
        assert_eq!(project.vimeo_id.as_deref(), Some("123456"));
    }
}
