use folio_catalog::{CatalogueStore, Project};
use folio_scraper::{AssetDownloader, PageFetcher};

use super::{DriverError, DriverStats, Pipeline};
use crate::reconcile::{clean_client, clean_production, fill_client, fill_title};

impl<S, F, D> Pipeline<'_, S, F, D>
where
    S: CatalogueStore,
    F: PageFetcher,
    D: AssetDownloader,
{
    /// Apply canonical titles, then canonical clients, where unset.
    pub fn cleanup_titles(&self) -> Result<DriverStats, DriverError> {
        let mut catalogue = self.load()?;
        let mut stats = DriverStats::default();
        self.progress.on_phase("Applying canonical titles");

        for project in &mut catalogue.projects {
            stats.processed += 1;
            let mut changed = false;
            if let Some(title) = self.rules.titles.get(&project.id) {
                if fill_title(project, title) {
                    self.progress.on_update(&project.id, &format!("title: {title}"));
                    changed = true;
                }
            }
            changed |= self.apply_known_client(project);
            if changed {
                stats.updated += 1;
            } else {
                stats.skipped += 1;
            }
        }

        self.finish(&catalogue, &stats, "Title cleanup")?;
        Ok(stats)
    }

    /// Clean run-together production and client credits, then fill
    /// canonical clients where still unset.
    pub fn cleanup_metadata(&self) -> Result<DriverStats, DriverError> {
        let mut catalogue = self.load()?;
        let mut stats = DriverStats::default();
        self.progress.on_phase("Cleaning production and client credits");

        for project in &mut catalogue.projects {
            stats.processed += 1;
            let mut changed = false;

            if let Some(raw) = project.production.clone().filter(|p| !p.trim().is_empty()) {
                let cleaned = clean_production(&raw, &self.rules.production_companies);
                if cleaned.as_deref() != Some(raw.as_str()) {
                    self.progress.on_update(
                        &project.id,
                        &format!("production {raw:?} -> {:?}", cleaned.as_deref().unwrap_or("")),
                    );
                    project.production = cleaned;
                    changed = true;
                }
            }

            if let Some(raw) = project.client.clone().filter(|c| !c.trim().is_empty()) {
                let cleaned = clean_client(&raw);
                if cleaned.as_deref() != Some(raw.as_str()) {
                    self.progress.on_update(
                        &project.id,
                        &format!("client {raw:?} -> {:?}", cleaned.as_deref().unwrap_or("")),
                    );
                    project.client = cleaned;
                    changed = true;
                }
            }

            changed |= self.apply_known_client(project);
            if changed {
                stats.updated += 1;
            } else {
                stats.skipped += 1;
            }
        }

        self.finish(&catalogue, &stats, "Metadata cleanup")?;
        Ok(stats)
    }

    fn apply_known_client(&self, project: &mut Project) -> bool {
        let Some(client) = self.rules.clients.get(&project.id) else {
            return false;
        };
        if !fill_client(project, client) {
            return false;
        }
        self.progress.on_update(&project.id, &format!("client: {client}"));
        true
    }
}
