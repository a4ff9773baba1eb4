use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};

use crate::models::{IndicatorSettings, SignalSettings};

/// Run configuration, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data_dir: PathBuf,
    pub recent_rows: usize,
    pub indicators: IndicatorSettings,
    pub signals: SignalSettings,
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Failed to parse {}='{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

fn env_date_or(key: &str, default: NaiveDate) -> Result<NaiveDate> {
    match std::env::var(key) {
        Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("Failed to parse {}='{}' as YYYY-MM-DD", key, raw)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let indicator_defaults = IndicatorSettings::default();
        let signal_defaults = SignalSettings::default();

        let default_start = NaiveDate::from_ymd_opt(2021, 1, 1).context("invalid default start date")?;

        let config = Self {
            ticker: std::env::var("TICKER").unwrap_or_else(|_| "^NSEI".to_string()),
            start_date: env_date_or("START_DATE", default_start)?,
            end_date: env_date_or("END_DATE", Utc::now().date_naive())?,
            data_dir: std::env::var("PRICE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            recent_rows: env_or("RECENT_ROWS", 10)?,
            indicators: IndicatorSettings {
                short_window: env_or("SHORT_WINDOW", indicator_defaults.short_window)?,
                long_window: env_or("LONG_WINDOW", indicator_defaults.long_window)?,
                rsi_period: env_or("RSI_PERIOD", indicator_defaults.rsi_period)?,
            },
            signals: SignalSettings {
                oversold: env_or("RSI_OVERSOLD", signal_defaults.oversold)?,
                overbought: env_or("RSI_OVERBOUGHT", signal_defaults.overbought)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            bail!("TICKER must not be empty");
        }
        if self.start_date > self.end_date {
            bail!(
                "START_DATE {} is after END_DATE {}",
                self.start_date,
                self.end_date
            );
        }
        self.indicators.validate()?;
        self.signals.validate()?;
        Ok(())
    }
}
