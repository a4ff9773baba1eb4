use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

use stock_signals::config::AppConfig;
use stock_signals::external::csv_provider::CsvPriceProvider;
use stock_signals::logging::{init_logging, LoggingConfig};
use stock_signals::services::price_service::load_price_series;
use stock_signals::{LatestSignal, SignalPoint, SignalService, SignalSummary};

#[derive(Debug, Serialize)]
struct SignalReport<'a> {
    ticker: &'a str,
    start: NaiveDate,
    end: NaiveDate,
    periods: usize,
    latest: Option<LatestSignal>,
    summary: SignalSummary,
    recent: &'a [SignalPoint],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let config = AppConfig::from_env()?;
    tracing::info!(
        ticker = %config.ticker,
        start = %config.start_date,
        end = %config.end_date,
        data_dir = %config.data_dir.display(),
        "🚀 Generating signals"
    );

    let provider = CsvPriceProvider::new(config.data_dir.clone());
    let series = load_price_series(&provider, &config.ticker, config.start_date, config.end_date)
        .await
        .with_context(|| format!("Could not load prices for {}", config.ticker))?;

    let service = SignalService::new(config.indicators, config.signals)?;
    let signals = service.generate_signals(&series);

    let report = SignalReport {
        ticker: &config.ticker,
        start: config.start_date,
        end: config.end_date,
        periods: signals.len(),
        latest: signals.latest(),
        summary: signals.summary(),
        recent: signals.recent(config.recent_rows),
    };

    if let Some(latest) = report.latest {
        tracing::info!(
            "📍 Latest signal for {}: {} on {} at {:.2}",
            config.ticker,
            latest.signal,
            latest.date,
            latest.close
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
