use folio_catalog::CatalogueStore;
use folio_scraper::extract::{find_thumbnail, find_video};
use folio_scraper::{AssetDownloader, Page, PageFetcher};

use super::{DriverError, DriverStats, Pipeline, thumbnail_rel};
use crate::reconcile::fill_video;

impl<S, F, D> Pipeline<'_, S, F, D>
where
    S: CatalogueStore,
    F: PageFetcher,
    D: AssetDownloader,
{
    /// Fill missing video ids and thumbnails from project pages.
    ///
    /// Targets every project lacking either, narrowed to `only` when it is
    /// non-empty. The thumbnail field is set only once the image is on disk.
    pub async fn fix_missing(&self, only: &[String]) -> Result<DriverStats, DriverError> {
        let mut catalogue = self.load()?;
        let mut stats = DriverStats::default();

        for id in only {
            if !catalogue.contains(id) {
                stats.skipped += 1;
                self.progress.on_skip(id, "not in catalogue");
            }
        }

        let targets: Vec<usize> = catalogue
            .projects
            .iter()
            .enumerate()
            .filter(|(_, p)| only.is_empty() || only.contains(&p.id))
            .filter(|(_, p)| p.video_is_unset() || p.thumbnail_is_unset())
            .map(|(i, _)| i)
            .collect();
        self.progress.on_phase(&format!(
            "Fixing {} projects missing a video id or thumbnail",
            targets.len()
        ));

        for (n, &index) in targets.iter().enumerate() {
            let project = &catalogue.projects[index];
            let id = project.id.clone();
            let Some(path) = self.rules.page_path(project) else {
                stats.skipped += 1;
                self.progress.on_skip(&id, "no page path for commercial project");
                continue;
            };
            self.progress.on_target(n + 1, targets.len(), &id);
            stats.processed += 1;

            let Some(html) = self.fetch_page(&id, &path, &mut stats).await else {
                self.pause().await;
                continue;
            };
            let (video, thumbnail) = {
                let page = Page::parse(html);
                (
                    find_video(&page),
                    find_thumbnail(&page, &self.options.image_rules),
                )
            };

            let mut changed = false;
            match video {
                Some(found) => {
                    let note = format!(
                        "{} id {} (from {})",
                        found.value.host(),
                        found.value.id(),
                        found.strategy
                    );
                    if fill_video(&mut catalogue.projects[index], found.value) {
                        self.progress.on_update(&id, &note);
                        changed = true;
                    }
                }
                None => self.progress.on_skip(&id, "no video id on page"),
            }

            if catalogue.projects[index].thumbnail_is_unset() {
                match thumbnail {
                    Some(found) => {
                        let category = catalogue.projects[index].category.clone();
                        let rel = thumbnail_rel(&catalogue, &category, &id, &found.value);
                        let dest = self.layout.thumbnail_path(&rel);
                        if self.store_asset(&id, &found.value, &dest, &mut stats).await {
                            self.progress.on_update(&id, &format!("thumbnail: {rel}"));
                            catalogue.projects[index].thumbnail = rel;
                            changed = true;
                        }
                    }
                    None => self.progress.on_skip(&id, "no qualifying image on page"),
                }
            }

            if changed {
                stats.updated += 1;
            }
            self.pause().await;
        }

        self.finish(&catalogue, &stats, "Fix missing")?;
        Ok(stats)
    }
}
