use folio_catalog::CatalogueStore;
use folio_scraper::extract::{Label, find_labelled};
use folio_scraper::{AssetDownloader, Page, PageFetcher};

use super::{DriverError, DriverStats, Pipeline};
use crate::reconcile::{fill_client, fill_production};

impl<S, F, D> Pipeline<'_, S, F, D>
where
    S: CatalogueStore,
    F: PageFetcher,
    D: AssetDownloader,
{
    /// Metadata backfill: client and production credits from each project page.
    pub async fn metadata(&self) -> Result<DriverStats, DriverError> {
        let mut catalogue = self.load()?;
        let mut stats = DriverStats::default();
        let total = catalogue.projects.len();
        self.progress
            .on_phase("Scraping project metadata (client, production)");

        for index in 0..total {
            let project = &catalogue.projects[index];
            let id = project.id.clone();
            if !project.client_is_unset() && !project.production_is_unset() {
                stats.skipped += 1;
                self.progress
                    .on_skip(&id, "client and production already set");
                continue;
            }
            let Some(path) = self.rules.page_path(project) else {
                stats.skipped += 1;
                self.progress.on_skip(&id, "no page path for commercial project");
                continue;
            };

            self.progress.on_target(index + 1, total, &id);
            stats.processed += 1;
            let Some(html) = self.fetch_page(&id, &path, &mut stats).await else {
                self.pause().await;
                continue;
            };
            let (client, production) = {
                let page = Page::parse(html);
                (
                    find_labelled(&page, Label::Client),
                    find_labelled(&page, Label::Production),
                )
            };

            let project = &mut catalogue.projects[index];
            let mut changed = false;
            if let Some(client) = client {
                if fill_client(project, &client.value) {
                    self.progress
                        .on_update(&id, &format!("client: {}", client.value));
                    changed = true;
                }
            }
            if let Some(production) = production {
                if fill_production(project, &production.value) {
                    self.progress
                        .on_update(&id, &format!("production: {}", production.value));
                    changed = true;
                }
            }
            if changed {
                stats.updated += 1;
            }

            self.pause().await;
        }

        self.finish(&catalogue, &stats, "Metadata")?;
        Ok(stats)
    }
}
