use folio_catalog::CatalogueStore;
use folio_scraper::{AssetDownloader, PageFetcher};

use super::{DriverError, DriverStats, Pipeline, thumbnail_rel};

impl<S, F, D> Pipeline<'_, S, F, D>
where
    S: CatalogueStore,
    F: PageFetcher,
    D: AssetDownloader,
{
    /// Download thumbnails from the known-thumbnail table for projects
    /// whose pages expose no usable image.
    pub async fn thumbnails(&self) -> Result<DriverStats, DriverError> {
        let mut catalogue = self.load()?;
        let mut stats = DriverStats::default();
        let total = self.rules.thumbnails.len();
        self.progress
            .on_phase(&format!("Backfilling {total} known thumbnails"));

        for (n, known) in self.rules.thumbnails.iter().enumerate() {
            self.progress.on_target(n + 1, total, &known.id);
            let Some(project) = catalogue.project(&known.id) else {
                stats.skipped += 1;
                self.progress.on_skip(&known.id, "not in catalogue");
                continue;
            };
            if !project.thumbnail_is_unset() {
                stats.skipped += 1;
                self.progress.on_skip(&known.id, "thumbnail already set");
                continue;
            }
            stats.processed += 1;

            let rel = thumbnail_rel(&catalogue, &known.category, &known.id, &known.url);
            let dest = self.layout.thumbnail_path(&rel);
            if self.store_asset(&known.id, &known.url, &dest, &mut stats).await {
                if let Some(project) = catalogue.project_mut(&known.id) {
                    project.thumbnail = rel;
                    stats.updated += 1;
                }
            }
            self.pause().await;
        }

        self.finish(&catalogue, &stats, "Thumbnails")?;
        Ok(stats)
    }
}
