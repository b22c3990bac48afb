//! Data model types for the portfolio catalogue.
//!
//! The catalogue is one JSON document holding the fixed category list and
//! the mutable project list. Project fields are filled progressively by the
//! ingestion drivers, so almost everything is optional; [`is_unset`] is the
//! single rule every driver uses to decide whether a field may be filled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Category ────────────────────────────────────────────────────────────────

/// Category id for commercial (TVC) work.
pub const COMMERCIAL: &str = "commercial";
/// Category id for branded content.
pub const BRANDED: &str = "branded";
/// Category id for vertical (social) video.
pub const VERTICAL: &str = "vertical";
/// Category id for colour-grading work. Only these projects carry galleries.
pub const COLOUR_GRADING: &str = "colour-grading";

/// A portfolio category. The set is fixed and never changes at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: id.to_string(),
        }
    }

    /// Path of the category's listing page on the origin site.
    pub fn listing_path(&self) -> String {
        format!("/{}", self.slug)
    }
}

/// The four categories the site has always shipped with.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(COMMERCIAL, "Commercial"),
        Category::new(BRANDED, "Branded"),
        Category::new(VERTICAL, "Vertical"),
        Category::new(COLOUR_GRADING, "Colour Grading"),
    ]
}

// ── Field predicate ─────────────────────────────────────────────────────────

/// Whether a field counts as "not really set".
///
/// A value is unset when it is absent, blank after trimming, or equal to the
/// placeholder (e.g. a client that merely repeats the project title). Drivers
/// only ever fill unset fields, so good data is never replaced.
pub fn is_unset(value: Option<&str>, placeholder: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => true,
        Some(v) => placeholder.is_some_and(|p| !p.trim().is_empty() && p.trim() == v),
    }
}

// ── Project ─────────────────────────────────────────────────────────────────

/// An external video reference. At most one is meaningful per project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoRef {
    Vimeo(String),
    YouTube(String),
}

impl VideoRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Vimeo(id) | Self::YouTube(id) => id,
        }
    }

    pub fn host(&self) -> &'static str {
        match self {
            Self::Vimeo(_) => "Vimeo",
            Self::YouTube(_) => "YouTube",
        }
    }
}

/// A portfolio project: the central mutable record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique slug; join key across every driver and a directory segment.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Foreign key into [`Category::id`].
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vimeo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    /// Path relative to the thumbnails root, or empty when unresolved.
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Paths relative to the gallery root (colour-grading projects only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    /// Keys this model does not know about (e.g. `created`, `updated`),
    /// carried through load/save untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Project {
    /// A freshly scraped project with the field shape the site templates expect.
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            category: category.into(),
            vimeo_id: Some(String::new()),
            thumbnail: String::new(),
            client: Some(String::new()),
            description: Some(String::new()),
            role: Some("Editor".to_string()),
            year: Some(String::new()),
            ..Default::default()
        }
    }

    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// A title is a placeholder when blank or when it is just the id (the
    /// fallback used when a page has no heading).
    pub fn title_is_unset(&self) -> bool {
        is_unset(self.title.as_deref(), Some(&self.id))
    }

    /// A client is a placeholder when blank or a copy of the title.
    pub fn client_is_unset(&self) -> bool {
        is_unset(self.client.as_deref(), self.title.as_deref())
    }

    pub fn production_is_unset(&self) -> bool {
        is_unset(self.production.as_deref(), None)
    }

    pub fn thumbnail_is_unset(&self) -> bool {
        is_unset(Some(&self.thumbnail), None)
    }

    pub fn gallery_is_unset(&self) -> bool {
        self.gallery.as_ref().is_none_or(|g| g.is_empty())
    }

    /// The project's video, preferring Vimeo when both are somehow present.
    pub fn video(&self) -> Option<VideoRef> {
        if !is_unset(self.vimeo_id.as_deref(), None) {
            return self.vimeo_id.clone().map(VideoRef::Vimeo);
        }
        if !is_unset(self.youtube_id.as_deref(), None) {
            return self.youtube_id.clone().map(VideoRef::YouTube);
        }
        None
    }

    pub fn video_is_unset(&self) -> bool {
        self.video().is_none()
    }

    pub fn set_video(&mut self, video: VideoRef) {
        match video {
            VideoRef::Vimeo(id) => self.vimeo_id = Some(id),
            VideoRef::YouTube(id) => self.youtube_id = Some(id),
        }
    }
}

// ── Catalogue ───────────────────────────────────────────────────────────────

/// Attempted to insert a project whose id is already taken.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("project id '{0}' already exists")]
pub struct DuplicateId(pub String);

/// The whole persisted state: categories plus projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Catalogue {
    /// An empty catalogue with the default category list.
    pub fn with_default_categories() -> Self {
        Self {
            categories: default_categories(),
            projects: Vec::new(),
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Directory segment used for a category's thumbnails.
    pub fn category_slug<'a>(&'a self, id: &'a str) -> &'a str {
        self.category(id).map(|c| c.slug.as_str()).unwrap_or(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.projects.iter().any(|p| p.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn projects_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects.iter().filter(move |p| p.category == category)
    }

    /// Append a project, refusing ids that already exist.
    pub fn insert_project(&mut self, project: Project) -> Result<(), DuplicateId> {
        if self.contains(&project.id) {
            return Err(DuplicateId(project.id));
        }
        self.projects.push(project);
        Ok(())
    }

    /// Put `projects` ahead of the existing ones, keeping their order.
    ///
    /// Projects whose id collides with an existing project (or an earlier
    /// entry of the same batch) are returned instead of inserted.
    pub fn prepend_projects(&mut self, projects: Vec<Project>) -> Vec<DuplicateId> {
        let mut accepted: Vec<Project> = Vec::with_capacity(projects.len());
        let mut rejected = Vec::new();
        for project in projects {
            if self.contains(&project.id) || accepted.iter().any(|p| p.id == project.id) {
                rejected.push(DuplicateId(project.id));
            } else {
                accepted.push(project);
            }
        }
        accepted.append(&mut self.projects);
        self.projects = accepted;
        rejected
    }

    /// Derive a free id from `base`: `base`, then `base-1`, `base-2`, ...
    pub fn unique_id(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{base}-{counter}");
            if !self.contains(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Ids that appear more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for project in &self.projects {
            if !seen.insert(project.id.as_str()) && !dupes.contains(&project.id) {
                dupes.push(project.id.clone());
            }
        }
        dupes
    }
}
