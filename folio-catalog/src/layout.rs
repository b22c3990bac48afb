//! Where things live under the site root.

use std::path::{Path, PathBuf};

/// Filesystem layout of a portfolio site checkout.
///
/// ```text
/// root/
///   data/projects.json
///   data/site.json
///   images/thumbnails/<category>/<file>
///   images/gallery/<project id>/<file>
///   images/headshot.jpg
///   rules/*.yaml
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub root: PathBuf,
    pub catalogue: PathBuf,
    pub site_config: PathBuf,
    pub images: PathBuf,
    pub rules: PathBuf,
}

impl SiteLayout {
    /// The conventional layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            catalogue: root.join("data").join("projects.json"),
            site_config: root.join("data").join("site.json"),
            images: root.join("images"),
            rules: root.join("rules"),
            root,
        }
    }

    pub fn thumbnails_dir(&self) -> PathBuf {
        self.images.join("thumbnails")
    }

    pub fn gallery_dir(&self) -> PathBuf {
        self.images.join("gallery")
    }

    pub fn headshot(&self) -> PathBuf {
        self.images.join("headshot.jpg")
    }

    /// Absolute path for a catalogue `thumbnail` value (`<category>/<file>`).
    pub fn thumbnail_path(&self, relative: &str) -> PathBuf {
        join_relative(&self.thumbnails_dir(), relative)
    }

    /// Absolute path for a catalogue `gallery` entry (`<id>/<file>`).
    pub fn gallery_path(&self, relative: &str) -> PathBuf {
        join_relative(&self.gallery_dir(), relative)
    }
}

fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_catalogue_paths_resolve_under_images() {
        let layout = SiteLayout::new("/site");
        assert_eq!(
            layout.thumbnail_path("branded/mud-to-marle.png"),
            PathBuf::from("/site/images/thumbnails/branded/mud-to-marle.png")
        );
        assert_eq!(
            layout.gallery_path("heisi/heisi-1.jpg"),
            PathBuf::from("/site/images/gallery/heisi/heisi-1.jpg")
        );
        assert_eq!(layout.catalogue, PathBuf::from("/site/data/projects.json"));
    }
}
