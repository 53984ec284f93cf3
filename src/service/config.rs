use std::env;

pub const DEFAULT_CALENDAR_URL: &str =
    "http://www.nasdaq.com/earnings/earnings-calendar.aspx";
pub const DEFAULT_REPORT_PREFIX: &str = "http://www.nasdaq.com/earnings/report/";

/// Where the scraper points and how it picks content out of the pages.
///
/// The defaults describe the NASDAQ earnings calendar layout. Everything is an
/// instance field rather than a process-wide constant so tests can substitute
/// their own endpoints and selectors.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Calendar endpoint; the formatted date goes in the `date` query parameter.
    pub calendar_url: String,
    /// Report links on the calendar start with this prefix; the rest is the ticker.
    pub report_prefix: String,
    /// Anchors holding the report links on the calendar page.
    pub calendar_link_selector: String,
    /// The single narrative node holding the forecast sentence.
    pub narrative_selector: String,
    /// Rows of the earnings-history table.
    pub history_row_selector: String,
    /// Cells within a history row.
    pub history_cell_selector: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            calendar_url: env::var("EARNINGS_CALENDAR_URL")
                .unwrap_or_else(|_| DEFAULT_CALENDAR_URL.to_string()),
            report_prefix: env::var("EARNINGS_REPORT_PREFIX")
                .unwrap_or_else(|_| DEFAULT_REPORT_PREFIX.to_string()),
            calendar_link_selector: "table#ECCompaniesTable tr > td:nth-of-type(2) a".into(),
            narrative_selector: "div#reportdata-div > p > span".into(),
            history_row_selector: "div#showdata-div div.genTable table tr".into(),
            history_cell_selector: "td".into(),
            timeout_secs: 15,
        }
    }
}
