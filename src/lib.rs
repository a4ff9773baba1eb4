//! Buy/Sell/Hold signals for a single closing-price series, from a dual
//! moving-average crossover overridden by RSI extremes.

pub mod config;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod services;

pub use errors::AppError;
pub use models::{
    IndicatorRecord, IndicatorSettings, LatestSignal, PricePoint, PriceSeries, Signal,
    SignalPoint, SignalSeries, SignalSettings, SignalSummary,
};
pub use services::indicators::IndicatorEngine;
pub use services::signal_service::{SignalRule, SignalService};
