use folio_catalog::{COLOUR_GRADING, CatalogueStore};
use folio_scraper::extract::gallery_images;
use folio_scraper::{AssetDownloader, Page, PageFetcher, asset_extension};

use super::{DriverError, DriverStats, Pipeline};

impl<S, F, D> Pipeline<'_, S, F, D>
where
    S: CatalogueStore,
    F: PageFetcher,
    D: AssetDownloader,
{
    /// Gallery images for colour-grading projects that have none yet.
    ///
    /// Images are stored as `<id>/<id>-<n><ext>`; the gallery lists only the
    /// ones that made it to disk.
    pub async fn gallery(&self) -> Result<DriverStats, DriverError> {
        let mut catalogue = self.load()?;
        let mut stats = DriverStats::default();

        let targets: Vec<usize> = catalogue
            .projects
            .iter()
            .enumerate()
            .filter(|(_, p)| p.category == COLOUR_GRADING)
            .map(|(i, _)| i)
            .collect();
        self.progress.on_phase(&format!(
            "Scraping galleries for {} colour grading projects",
            targets.len()
        ));

        for (n, &index) in targets.iter().enumerate() {
            let project = &catalogue.projects[index];
            let id = project.id.clone();
            if !project.gallery_is_unset() {
                stats.skipped += 1;
                self.progress.on_skip(&id, "gallery already set");
                continue;
            }
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
            let urls = gallery_images(&Page::parse(html), &self.options.image_rules);
            if urls.is_empty() {
                self.progress.on_skip(&id, "no gallery images on page");
                self.pause().await;
                continue;
            }
            self.progress
                .on_update(&id, &format!("found {} gallery images", urls.len()));

            let mut stored = Vec::with_capacity(urls.len());
            for (i, url) in urls.iter().enumerate() {
                let rel = format!("{id}/{id}-{}{}", i + 1, asset_extension(url));
                let dest = self.layout.gallery_path(&rel);
                if self.store_asset(&id, url, &dest, &mut stats).await {
                    stored.push(rel);
                }
            }
            if !stored.is_empty() {
                catalogue.projects[index].gallery = Some(stored);
                stats.updated += 1;
            }

            self.pause().await;
        }

        self.finish(&catalogue, &stats, "Gallery")?;
        Ok(stats)
    }
}
