pub mod earnings;

pub use earnings::{CalendarEntry, EarningsHistoryRow, EarningsRecord, EarningsReport};
