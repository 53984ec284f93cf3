use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::warn;

use crate::models::{EarningsHistoryRow, EarningsReport};
use crate::service::config::ScoutConfig;
use crate::service::ScoutError;

// The forecast narrative is a short, semi-fixed sentence; patterns are enough.
const EPS_PATTERN: &str = r"\s+EPS\s+forecast\s+for\s+the\s+quarter\s+is\s+\$([\-\+]?\d*\.\d*)";
const ANALYSTS_PATTERN: &str = r"based\s+on\s+(\d*)\s+analysts'";
const PREMARKET_PATTERN: &str = r"\s+before\s+market\s+open\.";

/// Extracts a structured [`EarningsReport`] from a report detail page.
///
/// Best-effort over one known page layout: anything that looks like the layout
/// changed (a malformed number anywhere in the history table) fails the whole
/// record rather than salvaging parts of it.
pub struct ReportParser {
    narrative_selector: Selector,
    row_selector: Selector,
    cell_selector: Selector,
    eps_pattern: Regex,
    analysts_pattern: Regex,
    premarket_pattern: Regex,
}

impl ReportParser {
    pub fn new(config: &ScoutConfig) -> Result<Self, ScoutError> {
        let narrative_selector = Selector::parse(&config.narrative_selector)
            .map_err(|e| ScoutError::Config(format!("invalid narrative selector: {e:?}")))?;
        let row_selector = Selector::parse(&config.history_row_selector)
            .map_err(|e| ScoutError::Config(format!("invalid history row selector: {e:?}")))?;
        let cell_selector = Selector::parse(&config.history_cell_selector)
            .map_err(|e| ScoutError::Config(format!("invalid history cell selector: {e:?}")))?;

        let eps_pattern = Regex::new(EPS_PATTERN)
            .map_err(|e| ScoutError::Config(format!("bad EPS pattern: {e}")))?;
        let analysts_pattern = Regex::new(ANALYSTS_PATTERN)
            .map_err(|e| ScoutError::Config(format!("bad analysts pattern: {e}")))?;
        let premarket_pattern = Regex::new(PREMARKET_PATTERN)
            .map_err(|e| ScoutError::Config(format!("bad premarket pattern: {e}")))?;

        Ok(Self {
            narrative_selector,
            row_selector,
            cell_selector,
            eps_pattern,
            analysts_pattern,
            premarket_pattern,
        })
    }

    /// Fetch a report page and parse it. A single attempt, no retries;
    /// transport failures degrade to `None` so the entry is skipped without
    /// aborting the run.
    pub async fn fetch_and_parse(&self, client: &Client, url: &str) -> Option<EarningsReport> {
        let resp = match client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Report request failed for {}: {}", url, e);
                return None;
            }
        };

        if !resp.status().is_success() {
            warn!("Report page {} returned status {}", url, resp.status());
            return None;
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Report body read failed for {}: {}", url, e);
                return None;
            }
        };

        self.parse(&body)
    }

    /// Parse one report document. Returns `None` when the page yields no
    /// usable data: an empty history table, a malformed number in any history
    /// row, or a narrative present without its mandatory EPS forecast.
    pub fn parse(&self, html: &str) -> Option<EarningsReport> {
        let document = Html::parse_document(html);

        // Narrative absence is tolerated; the history table alone can still
        // make a valid (if never-displayed) report.
        let (estimated_eps, analyst_count, is_premarket) =
            match self.narrative_text(&document) {
                Some(text) => {
                    let eps = self
                        .eps_pattern
                        .captures(&text)
                        .and_then(|c| c.get(1))
                        .and_then(|m| m.as_str().parse::<f64>().ok())?;

                    let analysts = self
                        .analysts_pattern
                        .captures(&text)
                        .and_then(|c| c.get(1))
                        .and_then(|m| m.as_str().parse::<u32>().ok())
                        .unwrap_or(0);

                    (Some(eps), analysts, self.premarket_pattern.is_match(&text))
                }
                None => (None, 0, false),
            };

        let history = self.parse_history(&document)?;

        Some(EarningsReport {
            estimated_eps,
            analyst_count,
            is_premarket,
            history,
        })
    }

    /// The forecast sentence, but only when the page has exactly one narrative
    /// node; zero or several means the layout shifted under us.
    fn narrative_text(&self, document: &Html) -> Option<String> {
        let mut nodes = document.select(&self.narrative_selector);
        let first = nodes.next()?;
        if nodes.next().is_some() {
            return None;
        }
        Some(first.text().collect())
    }

    fn parse_history(&self, document: &Html) -> Option<Vec<EarningsHistoryRow>> {
        let mut history = Vec::new();

        for row in document.select(&self.row_selector) {
            let cells: Vec<String> = row
                .select(&self.cell_selector)
                .map(|cell| cell.text().collect())
                .collect();

            // Header and separator rows
            if cells.len() < 5 {
                continue;
            }
            // Rendering-whitespace rows, not data. The HTML parser normalizes
            // CRLF to LF, so check both shapes of the artifact.
            if cells[0].starts_with("\r\n") || cells[0].starts_with('\n') {
                continue;
            }

            // A malformed number anywhere fails the whole record.
            let actual = cells[2].trim().parse::<f64>().ok()?;
            let expected = cells[3].trim().parse::<f64>().ok()?;
            let surprise = cells[4].trim().parse::<f64>().ok()?;

            history.push(EarningsHistoryRow {
                quarter: cells[0].clone(),
                reported_date: cells[1].clone(),
                actual,
                expected,
                surprise,
            });
        }

        if history.is_empty() {
            None
        } else {
            Some(history)
        }
    }
}
