use std::fmt::Write;

use crate::models::EarningsRecord;
use crate::service::pipeline::EntryOutcome;

/// One-line progress statement for a fetched entry, e.g.
/// `AAPL: http://.../aapl [OK]`.
pub fn format_progress(outcome: &EntryOutcome) -> String {
    format!(
        "{}: {} [{}]",
        outcome.symbol,
        outcome.detail_url,
        if outcome.found { "OK" } else { "SKIP" }
    )
}

/// Banner block plus structured dump for one retained record.
pub fn format_record(record: &EarningsRecord) -> String {
    let tag = format!("== {} ==", record.entry.symbol);
    let rule = "=".repeat(tag.len());

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{tag}");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "url:       {}", record.entry.detail_url);
    match record.report.estimated_eps {
        Some(eps) => {
            let _ = writeln!(out, "estimated: {eps:.2}");
        }
        None => {
            let _ = writeln!(out, "estimated: n/a");
        }
    }
    let _ = writeln!(out, "analysts:  {}", record.report.analyst_count);
    let _ = writeln!(
        out,
        "session:   {}",
        if record.report.is_premarket {
            "premarket"
        } else {
            "after-hours"
        }
    );
    let _ = writeln!(out, "history:");
    for row in &record.report.history {
        let _ = writeln!(
            out,
            "  {:<10} {:<12} actual {:>7.2}  expected {:>7.2}  surprise {:>7.2}",
            row.quarter, row.reported_date, row.actual, row.expected, row.surprise
        );
    }

    out
}
