use crate::models::{EarningsHistoryRow, EarningsRecord};

/// Post-fetch filtering rules applied to parsed records.
///
/// Surprise bounds act on magnitude: `surprise_delta_min` keeps history rows
/// with `|surprise| >= min`, `surprise_delta_max` keeps rows with
/// `|surprise| <= max`. A record whose history is emptied by either bound is
/// dropped entirely.
#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    pub surprise_delta_min: Option<f64>,
    pub surprise_delta_max: Option<f64>,
    /// `Some(true)` keeps premarket reports only, `Some(false)` after-hours only.
    pub premarket: Option<bool>,
}

impl ReportFilters {
    /// Apply the beat-expectations gate and the configured filters, preserving
    /// record order. Filtered histories are fresh copies; the inputs are
    /// consumed, never mutated in place for survivors of an earlier stage.
    pub fn apply(&self, records: Vec<EarningsRecord>) -> Vec<EarningsRecord> {
        records
            .into_iter()
            .filter_map(|record| self.apply_one(record))
            .collect()
    }

    fn apply_one(&self, mut record: EarningsRecord) -> Option<EarningsRecord> {
        // Only records forecast to beat their most recent reported quarter
        // make it to output. A report without a forecast can never beat it.
        let latest_actual = record.report.history.first()?.actual;
        let estimated = record.report.estimated_eps?;
        if estimated <= latest_actual {
            return None;
        }

        if let Some(wanted) = self.premarket {
            if record.report.is_premarket != wanted {
                return None;
            }
        }

        if self.surprise_delta_min.is_some() || self.surprise_delta_max.is_some() {
            let history: Vec<EarningsHistoryRow> = record
                .report
                .history
                .iter()
                .filter(|row| self.retain_row(row))
                .cloned()
                .collect();

            if history.is_empty() {
                return None;
            }
            record.report.history = history;
        }

        Some(record)
    }

    fn retain_row(&self, row: &EarningsHistoryRow) -> bool {
        if let Some(min) = self.surprise_delta_min {
            if row.surprise.abs() < min {
                return false;
            }
        }
        if let Some(max) = self.surprise_delta_max {
            if row.surprise.abs() > max {
                return false;
            }
        }
        true
    }
}
