use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::info;

use crate::models::EarningsRecord;
use crate::service::calendar::CalendarFetcher;
use crate::service::config::ScoutConfig;
use crate::service::filter::ReportFilters;
use crate::service::report::ReportParser;
use crate::service::ScoutError;

/// Per-entry fetch outcome, reported to the caller regardless of retention.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub symbol: String,
    pub detail_url: String,
    pub found: bool,
}

/// Everything a run produces: one progress outcome per calendar entry, and
/// the filtered records in calendar order.
#[derive(Debug)]
pub struct RunOutcome {
    pub progress: Vec<EntryOutcome>,
    pub records: Vec<EarningsRecord>,
}

/// Sequences calendar fetch, per-report fetch+parse, and filtering.
pub struct Pipeline {
    client: Client,
    fetcher: CalendarFetcher,
    parser: Arc<ReportParser>,
    concurrency: usize,
}

impl Pipeline {
    /// Build a pipeline with its own HTTP client. `concurrency` bounds how
    /// many report pages are in flight at once.
    pub fn new(config: ScoutConfig, concurrency: usize) -> Result<Self, ScoutError> {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScoutError::Http(format!("failed to build client: {e}")))?;

        let fetcher = CalendarFetcher::new(client.clone(), config.clone())?;
        let parser = Arc::new(ReportParser::new(&config)?);

        Ok(Self {
            client,
            fetcher,
            parser,
            concurrency: concurrency.max(1),
        })
    }

    /// Run the whole extraction for one calendar date.
    ///
    /// Report pages have no dependency on each other, so they are fetched
    /// concurrently; handles are awaited in calendar order, which keeps the
    /// output deterministic no matter which fetch finishes first. A failed
    /// report fetch or parse is a skip, never an abort.
    pub async fn run(
        &self,
        date: NaiveDate,
        filters: &ReportFilters,
    ) -> Result<RunOutcome, ScoutError> {
        let entries = self.fetcher.fetch_entries(date).await?;

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(entries.len());

        for entry in entries {
            let client = self.client.clone();
            let parser = self.parser.clone();
            let semaphore = semaphore.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let report = parser.fetch_and_parse(&client, &entry.detail_url).await;
                (entry, report)
            }));
        }

        let mut progress = Vec::with_capacity(handles.len());
        let mut records = Vec::new();

        for handle in handles {
            let Ok((entry, report)) = handle.await else {
                continue;
            };

            let found = report.is_some();
            info!(
                "{}: {} [{}]",
                entry.symbol,
                entry.detail_url,
                if found { "OK" } else { "SKIP" }
            );
            progress.push(EntryOutcome {
                symbol: entry.symbol.clone(),
                detail_url: entry.detail_url.clone(),
                found,
            });

            if let Some(report) = report {
                records.push(EarningsRecord { entry, report });
            }
        }

        let records = filters.apply(records);
        info!("Retained {} of {} fetched reports", records.len(), progress.len());

        Ok(RunOutcome { progress, records })
    }
}
