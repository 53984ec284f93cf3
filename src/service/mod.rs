pub mod calendar;
pub mod config;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod report;

#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("Calendar request error: {0}")]
    Http(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub use ScoutError as Error;
