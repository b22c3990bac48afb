use folio_catalog::{COMMERCIAL, CatalogueStore, Project, slugify};
use folio_scraper::{AssetDownloader, PageFetcher};

use super::{DriverError, DriverStats, Pipeline, thumbnail_rel};

impl<S, F, D> Pipeline<'_, S, F, D>
where
    S: CatalogueStore,
    F: PageFetcher,
    D: AssetDownloader,
{
    /// Import the commercial projects listed in the rule set.
    ///
    /// Ids are the slug of the title; an id already in the catalogue is
    /// skipped, so re-running adds nothing. New projects go ahead of the
    /// existing ones, in table order.
    pub async fn import_commercial(&self) -> Result<DriverStats, DriverError> {
        let mut catalogue = self.load()?;
        let mut stats = DriverStats::default();
        let total = self.rules.commercial.len();
        self.progress
            .on_phase(&format!("Importing {total} commercial projects"));

        let mut new_projects: Vec<Project> = Vec::new();
        for (n, entry) in self.rules.commercial.iter().enumerate() {
            let id = slugify(&entry.title);
            self.progress.on_target(n + 1, total, &id);
            if id.is_empty() {
                stats.failed += 1;
                self.progress
                    .on_failure(&entry.title, "title produces an empty id");
                continue;
            }
            if catalogue.contains(&id) || new_projects.iter().any(|p| p.id == id) {
                stats.skipped += 1;
                self.progress.on_skip(&id, "already in catalogue");
                continue;
            }
            stats.processed += 1;

            let mut project = Project::new(id.clone(), entry.title.clone(), COMMERCIAL);
            if let Some(client) = &entry.client {
                project.client = Some(client.clone());
            }

            let rel = thumbnail_rel(&catalogue, COMMERCIAL, &id, &entry.thumbnail);
            let dest = self.layout.thumbnail_path(&rel);
            if self.store_asset(&id, &entry.thumbnail, &dest, &mut stats).await {
                project.thumbnail = rel;
            }
            self.progress.on_update(&id, "queued for import");
            new_projects.push(project);
            self.pause().await;
        }

        let batch = new_projects.len();
        let rejected = catalogue.prepend_projects(new_projects);
        for duplicate in &rejected {
            stats.failed += 1;
            self.progress.on_failure(&duplicate.0, &duplicate.to_string());
        }
        stats.added = batch - rejected.len();

        self.finish(&catalogue, &stats, "Commercial import")?;
        Ok(stats)
    }
}
