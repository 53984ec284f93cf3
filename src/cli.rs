use chrono::{Duration, Local, NaiveDate};
use clap::Parser;

use crate::service::filter::ReportFilters;

/// Scan a day's NASDAQ earnings calendar and show the companies forecast to
/// beat their most recent reported quarter.
#[derive(Debug, Parser)]
#[command(name = "earnings-scout", version)]
pub struct Cli {
    /// Calendar date to scan, DD/MM/YYYY (default: tomorrow, local time)
    #[arg(long, value_parser = parse_cli_date)]
    pub date: Option<NaiveDate>,

    /// Keep only history rows with |surprise| at or above this bound
    #[arg(long)]
    pub surprise_delta_min: Option<f64>,

    /// Keep only history rows with |surprise| at or below this bound
    #[arg(long)]
    pub surprise_delta_max: Option<f64>,

    /// Show only reports announced before market open
    #[arg(long, conflicts_with = "no_premarket")]
    pub premarket: bool,

    /// Show only reports announced after hours
    #[arg(long)]
    pub no_premarket: bool,

    /// Maximum simultaneous report-page fetches
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Emit retained records as pretty JSON instead of text blocks
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The date to scan: the explicit flag, or tomorrow computed from local
    /// time at call time, never cached across invocations.
    pub fn target_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| Local::now().date_naive() + Duration::days(1))
    }

    pub fn filters(&self) -> ReportFilters {
        ReportFilters {
            surprise_delta_min: self.surprise_delta_min,
            surprise_delta_max: self.surprise_delta_max,
            premarket: if self.premarket {
                Some(true)
            } else if self.no_premarket {
                Some(false)
            } else {
                None
            },
        }
    }
}

fn parse_cli_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .map_err(|e| format!("expected DD/MM/YYYY: {e}"))
}
