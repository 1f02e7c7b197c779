//! One-shot diagnostic: run a single fetch-with-fallback and print the outcome.

use apod_daily::config::ApiConfig;
use apod_daily::{ApodClient, ApodFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let client = ApodClient::new(ApiConfig::from_env())?;
    match client.fetch_latest().await {
        Ok(record) => {
            println!("{} ({})", record.title, record.date);
            println!("{}", record.url);
            if let Some(hd) = &record.hdurl {
                println!("hd: {hd}");
            }
        }
        Err(err) => anyhow::bail!("fetch failed: {err}"),
    }
    Ok(())
}
