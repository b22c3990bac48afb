//! Catalogue summaries and consistency checks.

use std::fmt;
use std::path::PathBuf;

use folio_catalog::{Catalogue, SiteLayout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// Counts and gaps across the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueSummary {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
    pub with_gallery: usize,
    /// Ids of projects with no video reference.
    pub missing_video: Vec<String>,
    pub missing_thumbnail: Vec<String>,
    /// Ids whose client is blank or just repeats the title.
    pub missing_client: Vec<String>,
}

pub fn summarize(catalogue: &Catalogue) -> CatalogueSummary {
    let categories = catalogue
        .categories
        .iter()
        .map(|c| CategoryCount {
            id: c.id.clone(),
            name: c.name.clone(),
            count: catalogue.projects_in(&c.id).count(),
        })
        .collect();

    let ids_where = |pred: fn(&folio_catalog::Project) -> bool| -> Vec<String> {
        catalogue
            .projects
            .iter()
            .filter(|p| pred(p))
            .map(|p| p.id.clone())
            .collect()
    };

    CatalogueSummary {
        total: catalogue.projects.len(),
        categories,
        with_gallery: catalogue
            .projects
            .iter()
            .filter(|p| !p.gallery_is_unset())
            .count(),
        missing_video: ids_where(|p| p.video_is_unset()),
        missing_thumbnail: ids_where(|p| p.thumbnail_is_unset()),
        missing_client: ids_where(|p| p.client_is_unset()),
    }
}

/// One inconsistency found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    DuplicateId(String),
    UnknownCategory { id: String, category: String },
    MissingThumbnail { id: String, path: PathBuf },
    MissingGalleryImage { id: String, path: PathBuf },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate project id '{id}'"),
            Self::UnknownCategory { id, category } => {
                write!(f, "{id}: unknown category '{category}'")
            }
            Self::MissingThumbnail { id, path } => {
                write!(f, "{id}: thumbnail not found at {}", path.display())
            }
            Self::MissingGalleryImage { id, path } => {
                write!(f, "{id}: gallery image not found at {}", path.display())
            }
        }
    }
}

/// Check id uniqueness, category references, and that every referenced
/// image exists under the site layout.
pub fn validate(catalogue: &Catalogue, layout: &SiteLayout) -> Vec<Problem> {
    let mut problems: Vec<Problem> = catalogue
        .duplicate_ids()
        .into_iter()
        .map(Problem::DuplicateId)
        .collect();

    for project in &catalogue.projects {
        if catalogue.category(&project.category).is_none() {
            problems.push(Problem::UnknownCategory {
                id: project.id.clone(),
                category: project.category.clone(),
            });
        }
        if !project.thumbnail_is_unset() {
            let path = layout.thumbnail_path(&project.thumbnail);
            if !path.exists() {
                problems.push(Problem::MissingThumbnail {
                    id: project.id.clone(),
                    path,
                });
            }
        }
        for rel in project.gallery.iter().flatten() {
            let path = layout.gallery_path(rel);
            if !path.exists() {
                problems.push(Problem::MissingGalleryImage {
                    id: project.id.clone(),
                    path,
                });
            }
        }
    }
    problems
}
