use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::external::price_provider::{ExternalPricePoint, PriceProvider, PriceProviderError};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: Option<f64>,
}

/// Reads `<dir>/<TICKER>.csv` files with at least `Date` and `Close` columns,
/// the layout of a typical daily-history download.
pub struct CsvPriceProvider {
    data_dir: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{ticker}.csv"))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, PriceProviderError> {
    // Some exports append a time component: "2024-01-02 00:00:00+05:30"
    let day = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| PriceProviderError::Parse(format!("bad date '{raw}': {e}")))
}

pub fn read_history(
    path: &Path,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
    let content = std::fs::read_to_string(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for (line_num, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(|e| {
            PriceProviderError::Parse(format!("row {}: {}", line_num + 2, e))
        })?;

        let date = parse_date(&row.date)?;
        if date < start || date > end {
            continue;
        }

        match row.close {
            Some(close) => points.push(ExternalPricePoint { date, close }),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(path = %path.display(), skipped, "skipped rows without a close price");
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

#[async_trait]
impl PriceProvider for CsvPriceProvider {
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
        let path = self.path_for(ticker);
        if !path.exists() {
            return Err(PriceProviderError::NotFound(ticker.to_string()));
        }

        debug!(ticker, path = %path.display(), %start, %end, "reading price history");

        tokio::task::spawn_blocking(move || read_history(&path, start, end))
            .await
            .map_err(|e| PriceProviderError::Parse(format!("reader task failed: {e}")))?
    }
}
