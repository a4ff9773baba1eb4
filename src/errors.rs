use chrono::NaiveDate;
use thiserror::Error;

use crate::external::price_provider::PriceProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("No price data for {ticker} between {start} and {end}")]
    DataUnavailable {
        ticker: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("Price provider error: {0}")]
    Provider(#[from] PriceProviderError),
}
