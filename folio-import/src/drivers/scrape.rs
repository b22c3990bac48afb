use std::collections::HashMap;

use folio_catalog::{
    Catalogue, CatalogueStore, Category, Project, StoreError, VideoRef, default_categories,
    slugify,
};
use folio_scraper::extract::{find_headshot, find_thumbnail, find_title, find_video, project_links};
use folio_scraper::{AssetDownloader, ImageRules, Page, PageFetcher};

use super::{DriverError, DriverStats, Pipeline, thumbnail_rel};
use crate::reconcile::{fill_title, fill_video};

/// What a project page yielded.
struct ProjectPage {
    title: Option<String>,
    video: Option<VideoRef>,
    thumbnail: Option<String>,
}

fn read_project_page(html: String, rules: &ImageRules) -> ProjectPage {
    let page = Page::parse(html);
    ProjectPage {
        title: find_title(&page).map(|t| t.value),
        video: find_video(&page).map(|v| v.value),
        thumbnail: find_thumbnail(&page, rules).map(|t| t.value),
    }
}

/// Last path segment of a project link (`/branded/heisi` -> `heisi`).
fn link_slug(link: &str) -> String {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(link)
        .to_string()
}

impl<S, F, D> Pipeline<'_, S, F, D>
where
    S: CatalogueStore,
    F: PageFetcher,
    D: AssetDownloader,
{
    /// Initial scrape: every category listing, each linked project page,
    /// and the about-page headshot.
    ///
    /// The only driver that may create the catalogue. A missing catalogue
    /// starts empty with the fixed categories; an existing one is merged
    /// into (new ids inserted, existing projects only get unset fields).
    ///
    /// A project's id is the slug of its page heading, or the last segment
    /// of its link when the page has no heading or the heading's slug was
    /// already taken by another link in this run.
    pub async fn scrape(&self) -> Result<DriverStats, DriverError> {
        let mut catalogue = match self.store.load() {
            Ok(catalogue) => catalogue,
            Err(StoreError::NotFound(path)) => {
                self.progress
                    .on_phase(&format!("No catalogue at {path}, starting a new one"));
                Catalogue::with_default_categories()
            }
            Err(e) => return Err(e.into()),
        };
        if catalogue.categories.is_empty() {
            catalogue.categories = default_categories();
        }
        let mut stats = DriverStats::default();
        // id -> link that produced it during this run
        let mut claimed: HashMap<String, String> = HashMap::new();

        for category in catalogue.categories.clone() {
            self.progress
                .on_phase(&format!("Scraping {} listing", category.name));
            let listing = category.listing_path();
            let Some(html) = self.fetch_page(&category.id, &listing, &mut stats).await else {
                self.pause().await;
                continue;
            };
            let links = project_links(&Page::parse(html), &listing);
            self.progress
                .on_phase(&format!("Found {} project links", links.len()));

            for (i, link) in links.iter().enumerate() {
                self.pause().await;
                self.progress.on_target(i + 1, links.len(), link);
                stats.processed += 1;
                self.scrape_project(
                    &mut catalogue,
                    &mut claimed,
                    &category,
                    link,
                    &mut stats,
                )
                .await;
            }
            self.pause().await;
        }

        self.scrape_headshot(&mut stats).await;
        self.finish(&catalogue, &stats, "Scrape")?;
        Ok(stats)
    }

    async fn scrape_project(
        &self,
        catalogue: &mut Catalogue,
        claimed: &mut HashMap<String, String>,
        category: &Category,
        link: &str,
        stats: &mut DriverStats,
    ) {
        let Some(html) = self.fetch_page(link, link, stats).await else {
            return;
        };
        let found = read_project_page(html, &self.options.image_rules);

        let fallback = link_slug(link);
        let title = found.title.unwrap_or_else(|| fallback.clone());
        let taken = |id: &str, claimed: &HashMap<String, String>| {
            claimed.get(id).is_some_and(|owner| owner != link)
        };
        let mut id = match slugify(&title) {
            slug if slug.is_empty() => fallback.clone(),
            slug => slug,
        };
        if taken(&id, &*claimed) {
            log::debug!("{link}: id {id} already scraped from another page");
            id = fallback;
        }
        if taken(&id, &*claimed) {
            stats.failed += 1;
            self.progress
                .on_failure(link, &format!("id {id} already scraped from another page"));
            return;
        }
        claimed.insert(id.clone(), link.to_string());

        let mut thumbnail = None;
        if let Some(url) = &found.thumbnail {
            let wanted = catalogue
                .project(&id)
                .is_none_or(|p| p.thumbnail_is_unset());
            if wanted {
                let rel = thumbnail_rel(catalogue, &category.id, &id, url);
                let dest = self.layout.thumbnail_path(&rel);
                if self.store_asset(&id, url, &dest, stats).await {
                    thumbnail = Some(rel);
                }
            }
        }

        if let Some(existing) = catalogue.project_mut(&id) {
            let mut changed = fill_title(existing, &title);
            if let Some(video) = found.video {
                changed |= fill_video(existing, video);
            }
            if let Some(rel) = thumbnail {
                if existing.thumbnail_is_unset() {
                    existing.thumbnail = rel;
                    changed = true;
                }
            }
            if changed {
                stats.updated += 1;
                self.progress.on_update(&id, "filled missing fields");
            } else {
                stats.skipped += 1;
                self.progress.on_skip(&id, "already in catalogue");
            }
            return;
        }

        let mut project = Project::new(id.clone(), title, category.id.clone());
        let video_note = match &found.video {
            Some(video) => format!("{} {}", video.host(), video.id()),
            None => "no video".to_string(),
        };
        if let Some(video) = found.video {
            project.set_video(video);
        }
        if let Some(rel) = thumbnail {
            project.thumbnail = rel;
        }
        match catalogue.insert_project(project) {
            Ok(()) => {
                stats.added += 1;
                self.progress.on_update(&id, &format!("added ({video_note})"));
            }
            Err(e) => {
                stats.failed += 1;
                self.progress.on_failure(&id, &e.to_string());
            }
        }
    }

    async fn scrape_headshot(&self, stats: &mut DriverStats) {
        self.progress.on_phase("Scraping about page for headshot");
        let Some(html) = self.fetch_page("headshot", "/about", stats).await else {
            return;
        };
        let Some(url) = find_headshot(&Page::parse(html), &self.options.image_rules) else {
            self.progress.on_skip("headshot", "no image on the about page");
            return;
        };
        self.store_asset("headshot", &url, &self.layout.headshot(), stats)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_slug_takes_last_segment() {
        assert_eq!(link_slug("/branded/heisi"), "heisi");
        assert_eq!(link_slug("/branded/heisi/"), "heisi");
    }
}
