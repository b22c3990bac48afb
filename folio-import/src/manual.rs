//! Adding a project by hand.

use chrono::NaiveDateTime;
use folio_catalog::{Catalogue, DuplicateId, Project, VideoRef, slugify};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddError {
    #[error("Project title cannot be empty")]
    EmptyTitle,
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Title '{0}' has no characters usable in an id")]
    EmptyId(String),
    #[error(transparent)]
    Duplicate(#[from] DuplicateId),
}

/// Fields supplied for a manually added project.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub category: String,
    pub client: Option<String>,
    pub video: Option<VideoRef>,
}

/// Insert a new project and return its id.
///
/// The id is the slug of the title, suffixed `-1`, `-2`, ... until free.
/// The project starts with an empty gallery and a `created` timestamp.
pub fn add_project(
    catalogue: &mut Catalogue,
    new: NewProject,
    created: NaiveDateTime,
) -> Result<String, AddError> {
    let title = new.title.trim();
    if title.is_empty() {
        return Err(AddError::EmptyTitle);
    }
    if catalogue.category(&new.category).is_none() {
        return Err(AddError::UnknownCategory(new.category));
    }
    let base = slugify(title);
    if base.is_empty() {
        return Err(AddError::EmptyId(title.to_string()));
    }
    let id = catalogue.unique_id(&base);

    let mut project = Project::new(id.clone(), title, new.category);
    project.gallery = Some(Vec::new());
    if let Some(client) = new.client.filter(|c| !c.trim().is_empty()) {
        project.client = Some(client.trim().to_string());
    }
    if let Some(video) = new.video {
        project.set_video(video);
    }
    project.extra.insert(
        "created".to_string(),
        created.format("%Y-%m-%dT%H:%M:%S%.6f").to_string().into(),
    );

    catalogue.insert_project(project)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_catalog::BRANDED;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_micro_opt(9, 26, 53, 589_793)
            .unwrap()
    }

    fn new_branded(title: &str) -> NewProject {
        NewProject {
            title: title.to_string(),
            category: BRANDED.to_string(),
            ..NewProject::default()
        }
    }

    #[test]
    fn adds_with_slug_id_and_timestamp() {
        let mut catalogue = Catalogue::with_default_categories();
        let id = add_project(&mut catalogue, new_branded("Heisi: A Short Film"), at()).unwrap();
        assert_eq!(id, "heisi-a-short-film");

        let project = catalogue.project(&id).unwrap();
        assert_eq!(project.gallery, Some(Vec::new()));
        assert_eq!(project.role.as_deref(), Some("Editor"));
        assert_eq!(
            project.extra.get("created").and_then(|v| v.as_str()),
            Some("2026-03-14T09:26:53.589793")
        );
    }

    #[test]
    fn colliding_titles_get_counters() {
        let mut catalogue = Catalogue::with_default_categories();
        let first = add_project(&mut catalogue, new_branded("Reel"), at()).unwrap();
        let second = add_project(&mut catalogue, new_branded("Reel"), at()).unwrap();
        let third = add_project(&mut catalogue, new_branded("reel"), at()).unwrap();
        assert_eq!((first.as_str(), second.as_str(), third.as_str()), ("reel", "reel-1", "reel-2"));
        assert!(catalogue.duplicate_ids().is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        let mut catalogue = Catalogue::with_default_categories();
        assert_eq!(
            add_project(&mut catalogue, new_branded("   "), at()),
            Err(AddError::EmptyTitle)
        );
        assert_eq!(
            add_project(&mut catalogue, new_branded("!!!"), at()),
            Err(AddError::EmptyId("!!!".to_string()))
        );
        let mut wrong = new_branded("Fine");
        wrong.category = "music-video".to_string();
        assert_eq!(
            add_project(&mut catalogue, wrong, at()),
            Err(AddError::UnknownCategory("music-video".to_string()))
        );
        assert!(catalogue.projects.is_empty());
    }
}
