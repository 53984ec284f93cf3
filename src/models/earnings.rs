use serde::{Deserialize, Serialize};

/// One company's listing on the daily earnings calendar: the ticker and the
/// link to its report detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub symbol: String,
    pub detail_url: String,
}

/// One historical reporting period from a report page's earnings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsHistoryRow {
    pub quarter: String,
    pub reported_date: String,
    pub actual: f64,
    pub expected: f64,
    pub surprise: f64,
}

/// Structured data extracted from a single report detail page.
///
/// `estimated_eps` is `None` when the page carried no forecast narrative; such
/// a report is still valid as long as its history table parsed, but it can
/// never beat expectations downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_eps: Option<f64>,
    pub analyst_count: u32,
    pub is_premarket: bool,
    /// Most recent reporting period first, as rows appear on the page.
    pub history: Vec<EarningsHistoryRow>,
}

/// Final unit of output: a calendar entry joined with its parsed report.
/// Only built for entries whose detail parse succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub entry: CalendarEntry,
    pub report: EarningsReport,
}
