use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use earnings_scout::service::config::ScoutConfig;
use earnings_scout::service::filter::ReportFilters;
use earnings_scout::service::pipeline::Pipeline;

const CALENDAR_PATH: &str = "/earnings/earnings-calendar.aspx";

fn test_config(server: &MockServer) -> ScoutConfig {
    ScoutConfig {
        calendar_url: format!("{}{}", server.uri(), CALENDAR_PATH),
        report_prefix: format!("{}/earnings/report/", server.uri()),
        timeout_secs: 5,
        ..ScoutConfig::default()
    }
}

fn calendar_page(server: &MockServer, tickers: &[&str]) -> String {
    let rows: String = tickers
        .iter()
        .map(|t| {
            format!(
                r#"<tr><td>{t} Inc.</td><td><a href="{}/earnings/report/{}">{t}</a></td></tr>"#,
                server.uri(),
                t.to_lowercase(),
            )
        })
        .collect();
    format!(r#"<html><body><table id="ECCompaniesTable">{rows}</table></body></html>"#)
}

fn detail_page(estimated: f64, latest_actual: f64) -> String {
    format!(
        r#"<html><body>
        <div id="reportdata-div"><p><span>The consensus EPS forecast for the quarter is
        ${estimated:.2} based on 7 analysts' estimates. The company reports before market open.</span></p></div>
        <div id="showdata-div"><div class="genTable"><table>
          <tr><th>Quarter</th><th>Reported</th><th>Actual</th><th>Expected</th><th>Surprise</th></tr>
          <tr><td>Q4 2025</td><td>1/28/2026</td><td>{latest_actual}</td><td>1.2</td><td>25.0</td></tr>
        </table></div></div>
        </body></html>"#
    )
}

async fn mount_calendar(server: &MockServer, date: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(CALENDAR_PATH))
        .and(query_param("date", date))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, ticker: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/earnings/report/{ticker}")))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn retains_only_records_that_beat_expectations() {
    let server = MockServer::start().await;
    let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

    mount_calendar(&server, "2026-Aug-31", calendar_page(&server, &["AAPL", "MSFT"])).await;
    // AAPL's forecast beats its latest reported quarter, MSFT's does not.
    mount_detail(
        &server,
        "aapl",
        ResponseTemplate::new(200).set_body_string(detail_page(2.0, 1.5)),
    )
    .await;
    mount_detail(
        &server,
        "msft",
        ResponseTemplate::new(200).set_body_string(detail_page(1.0, 1.5)),
    )
    .await;

    let pipeline = Pipeline::new(test_config(&server), 4).unwrap();
    let outcome = pipeline.run(date, &ReportFilters::default()).await.unwrap();

    assert_eq!(outcome.progress.len(), 2);
    assert!(outcome.progress.iter().all(|p| p.found));

    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.entry.symbol, "AAPL");
    assert_eq!(record.report.estimated_eps, Some(2.0));
    assert_eq!(record.report.analyst_count, 7);
    assert!(record.report.is_premarket);
    assert_eq!(record.report.history[0].actual, 1.5);
}

#[tokio::test]
async fn failed_report_page_is_a_skip_not_an_abort() {
    let server = MockServer::start().await;
    let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

    mount_calendar(&server, "2026-Aug-31", calendar_page(&server, &["GOOD", "BAD"])).await;
    mount_detail(
        &server,
        "good",
        ResponseTemplate::new(200).set_body_string(detail_page(2.0, 1.5)),
    )
    .await;
    mount_detail(&server, "bad", ResponseTemplate::new(500)).await;

    let pipeline = Pipeline::new(test_config(&server), 4).unwrap();
    let outcome = pipeline.run(date, &ReportFilters::default()).await.unwrap();

    assert_eq!(outcome.progress.len(), 2);
    assert!(outcome.progress[0].found);
    assert!(!outcome.progress[1].found);

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].entry.symbol, "GOOD");
}

#[tokio::test]
async fn calendar_failure_aborts_the_run() {
    let server = MockServer::start().await;
    let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

    Mock::given(method("GET"))
        .and(path(CALENDAR_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config(&server), 4).unwrap();
    assert!(pipeline.run(date, &ReportFilters::default()).await.is_err());
}

#[tokio::test]
async fn quiet_day_yields_an_empty_run() {
    let server = MockServer::start().await;
    let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    mount_calendar(
        &server,
        "2026-Sep-01",
        "<html><body><p>No earnings scheduled.</p></body></html>".to_string(),
    )
    .await;

    let pipeline = Pipeline::new(test_config(&server), 4).unwrap();
    let outcome = pipeline.run(date, &ReportFilters::default()).await.unwrap();

    assert!(outcome.progress.is_empty());
    assert!(outcome.records.is_empty());
}

#[tokio::test]
async fn surprise_delta_min_drops_emptied_records() {
    let server = MockServer::start().await;
    let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

    // BIG's only row has |surprise| 25.0, SMALL's 5.0.
    let small_detail = r#"<html><body>
        <div id="reportdata-div"><p><span>The consensus EPS forecast for the quarter is
        $2.00 based on 3 analysts' estimates.</span></p></div>
        <div id="showdata-div"><div class="genTable"><table>
          <tr><td>Q4 2025</td><td>1/28/2026</td><td>1.5</td><td>1.4</td><td>5.0</td></tr>
        </table></div></div>
        </body></html>"#;

    mount_calendar(&server, "2026-Aug-31", calendar_page(&server, &["BIG", "SMALL"])).await;
    mount_detail(
        &server,
        "big",
        ResponseTemplate::new(200).set_body_string(detail_page(2.0, 1.5)),
    )
    .await;
    mount_detail(
        &server,
        "small",
        ResponseTemplate::new(200).set_body_string(small_detail),
    )
    .await;

    let filters = ReportFilters {
        surprise_delta_min: Some(16.0),
        ..Default::default()
    };

    let pipeline = Pipeline::new(test_config(&server), 4).unwrap();
    let outcome = pipeline.run(date, &filters).await.unwrap();

    assert_eq!(outcome.progress.len(), 2);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].entry.symbol, "BIG");
}
