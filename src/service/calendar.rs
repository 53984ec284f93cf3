use chrono::NaiveDate;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::models::CalendarEntry;
use crate::service::config::ScoutConfig;
use crate::service::ScoutError;

/// Format a date the way the calendar endpoint expects it, e.g. `2026-Aug-31`.
pub fn calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%b-%d").to_string()
}

/// Discovers the day's report links from the earnings calendar page.
pub struct CalendarFetcher {
    client: Client,
    config: ScoutConfig,
    link_selector: Selector,
}

impl CalendarFetcher {
    pub fn new(client: Client, config: ScoutConfig) -> Result<Self, ScoutError> {
        let link_selector = Selector::parse(&config.calendar_link_selector)
            .map_err(|e| ScoutError::Config(format!("invalid calendar link selector: {e:?}")))?;

        Ok(Self {
            client,
            config,
            link_selector,
        })
    }

    /// Fetch the calendar for a date and return its (symbol, report link) pairs
    /// in page order. A calendar page with no earnings table is a quiet day and
    /// yields an empty list; a transport failure is an error, since nothing
    /// downstream can run without the calendar.
    pub async fn fetch_entries(&self, date: NaiveDate) -> Result<Vec<CalendarEntry>, ScoutError> {
        let date_str = calendar_date(date);
        info!("Fetching earnings calendar for {}", date_str);

        let resp = self
            .client
            .get(&self.config.calendar_url)
            .query(&[("date", date_str.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!("Calendar request failed: {}", e);
                ScoutError::Http(format!("calendar request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            warn!("Calendar returned error status {}", status);
            return Err(ScoutError::Http(format!("calendar status {status}")));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("calendar body read failed: {e}")))?;

        let entries = self.extract_entries(&body);
        info!("Calendar for {} listed {} companies", date_str, entries.len());
        Ok(entries)
    }

    /// Pull report links out of the calendar document. The ticker is whatever
    /// follows the report prefix, uppercased; links shaped any other way are
    /// not report links and are skipped.
    pub fn extract_entries(&self, html: &str) -> Vec<CalendarEntry> {
        let document = Html::parse_document(html);

        document
            .select(&self.link_selector)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| {
                let symbol = href.strip_prefix(&self.config.report_prefix)?;
                Some(CalendarEntry {
                    symbol: symbol.to_uppercase(),
                    detail_url: href.to_string(),
                })
            })
            .collect()
    }
}
