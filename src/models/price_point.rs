use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// One closing price per trading period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// A non-empty run of closes ordered by strictly increasing date.
///
/// The only way to build one is [`PriceSeries::new`], so everything downstream
/// can rely on the ordering and on every close being a positive finite number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AppError> {
        if points.is_empty() {
            return Err(AppError::Validation("price series is empty".to_string()));
        }

        if let Some(bad) = points.iter().find(|p| !p.close.is_finite() || p.close <= 0.0) {
            return Err(AppError::Validation(format!(
                "close on {} must be a positive number, got {}",
                bad.date, bad.close
            )));
        }

        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(AppError::Validation(format!(
                "dates must be strictly increasing: {} is followed by {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    // Always false, kept for clippy's len_without_is_empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }
}
