use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;

use earnings_scout::cli::Cli;
use earnings_scout::service::calendar::calendar_date;
use earnings_scout::service::config::ScoutConfig;
use earnings_scout::service::output;
use earnings_scout::service::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let date = cli.target_date();
    let filters = cli.filters();

    info!("Scanning earnings calendar for {}", calendar_date(date));
    println!("date: {}", calendar_date(date));

    let pipeline = Pipeline::new(ScoutConfig::default(), cli.concurrency)?;
    let outcome = pipeline.run(date, &filters).await?;

    for entry in &outcome.progress {
        println!("{}", output::format_progress(entry));
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.records)?);
    } else {
        for record in &outcome.records {
            print!("{}", output::format_record(record));
        }
    }

    Ok(())
}
