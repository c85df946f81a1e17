use std::time::Duration;

use feed::{assemble, render, FeedItem, VesselFilter};
use havari::{fetch_all_reports, HavariClient};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const OUTFILE: &str = "sht-fiske.xml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let reports = fetch_all_reports(&HavariClient::with_client(client)).await?;
    tracing::info!("Fetched {} reports in total", reports.len());

    // One timestamp per run: lastBuildDate and every missing-date fallback
    // share it, so re-rendering within a run is byte-identical.
    let now = chrono::Utc::now();
    let filter = VesselFilter::default();

    let items: Vec<FeedItem> = reports
        .iter()
        .filter(|report| filter.matches(report.classification()))
        .map(|report| render(report, now))
        .collect();

    let rss = assemble(&items, now)?;
    tokio::fs::write(OUTFILE, &rss).await?;

    tracing::info!("Wrote {} with {} items", OUTFILE, items.len());
    Ok(())
}
