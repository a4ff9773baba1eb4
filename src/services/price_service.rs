use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::external::price_provider::PriceProvider;
use crate::models::{PricePoint, PriceSeries};

/// Fetch a ticker's closes for `[start, end]` and turn them into a validated
/// series. An empty fetch is a hard stop: nothing downstream runs on it.
pub async fn load_price_series(
    provider: &dyn PriceProvider,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, AppError> {
    if start > end {
        return Err(AppError::Validation(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }

    let external = provider
        .fetch_daily_history(ticker, start, end)
        .await
        .map_err(|e| {
            error!("Failed to fetch price history for ticker {}: {}", ticker, e);
            AppError::Provider(e)
        })?;

    if external.is_empty() {
        warn!("No price data found for ticker {} in {}..={}", ticker, start, end);
        return Err(AppError::DataUnavailable {
            ticker: ticker.to_string(),
            start,
            end,
        });
    }

    let points: Vec<PricePoint> = external
        .into_iter()
        .map(|p| PricePoint::new(p.date, p.close))
        .collect();

    let series = PriceSeries::new(points)?;
    info!(
        "Loaded {} closes for {} ({} to {})",
        series.len(),
        ticker,
        series.first_date(),
        series.last_date()
    );

    Ok(series)
}
