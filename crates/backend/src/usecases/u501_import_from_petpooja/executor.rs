use super::petpooja_api_client::{Fetcher, SalesTransport};
use super::processors::{locator, sales};
use crate::domain::a001_petpooja_sale::repository::SalesStore;
use crate::shared::config::PetpoojaConfig;
use anyhow::{Context, Result};
use chrono::Utc;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_from_petpooja::{
    ImportFromPetpooja, ImportOutcome, ImportSummary,
};

/// Executor for the PetPooja sales import: fetch, locate, normalize, persist
pub struct ImportExecutor<T: SalesTransport> {
    fetcher: Fetcher<T>,
    store: SalesStore,
}

impl<T: SalesTransport> ImportExecutor<T> {
    pub fn new(fetcher: Fetcher<T>, store: SalesStore) -> Self {
        Self { fetcher, store }
    }

    pub async fn run(&self, config: &PetpoojaConfig) -> Result<ImportOutcome> {
        let started_at = Utc::now();
        tracing::info!(
            "=== {} ({}) ===",
            ImportFromPetpooja::display_name(),
            ImportFromPetpooja::full_name()
        );

        let url = config.request_url();
        tracing::info!("Request URL built: {}", config.redacted_url());

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) if !body.trim().is_empty() => body,
            Ok(_) => return Ok(no_data("empty response body")),
            Err(e) => return Ok(no_data(&e.to_string())),
        };

        self.store
            .ensure_schema()
            .await
            .context("Failed to create sales table")?;

        let document: serde_json::Value =
            serde_json::from_str(&body).context("Failed to parse PetPooja API JSON")?;

        let candidates = locator::locate(&document);
        tracing::info!("Found {} candidate records", candidates.len());

        let mut skipped = 0;
        let mut inserted = 0;
        for (index, item) in candidates.iter().enumerate() {
            match sales::normalize(item) {
                Ok(record) => inserted += self.store.insert(&record).await,
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Failed parsing record #{}: {}", index, e);
                }
            }
        }

        let summary = ImportSummary {
            candidates: candidates.len(),
            skipped,
            inserted,
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!("Completed. Rows inserted: {}", summary.inserted);
        if skipped > 0 || summary.failed_inserts() > 0 {
            tracing::warn!(
                "{} records skipped, {} inserts failed",
                skipped,
                summary.failed_inserts()
            );
        }
        match serde_json::to_string(&summary) {
            Ok(json) => tracing::info!("Import summary: {}", json),
            Err(e) => tracing::warn!("Could not serialize import summary: {}", e),
        }
        match self.store.count().await {
            Ok(total) => tracing::info!("sales_data now holds {} rows", total),
            Err(e) => tracing::warn!("Could not count sales_data rows: {}", e),
        }

        Ok(ImportOutcome::Completed(summary))
    }
}

fn no_data(reason: &str) -> ImportOutcome {
    tracing::warn!("No response or empty response received: {}", reason);
    ImportOutcome::NoData {
        reason: reason.to_string(),
    }
}
