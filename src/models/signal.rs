use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::IndicatorRecord;

/// Categorical trading signal for one period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Sell => write!(f, "Sell"),
            Signal::Hold => write!(f, "Hold"),
        }
    }
}

/// One row of the classified series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub date: NaiveDate,

    #[serde(flatten)]
    pub indicators: IndicatorRecord,

    pub signal: Signal,
}

/// Headline view of the most recent period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestSignal {
    pub date: NaiveDate,
    pub close: f64,
    pub signal: Signal,
}

/// Number of periods per signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalSummary {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
}

/// The classified series, same length and ordering as the input prices.
///
/// Read-only once built: consumers get slices and copies, never `&mut`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSeries {
    points: Vec<SignalPoint>,
}

impl SignalSeries {
    pub(crate) fn new(points: Vec<SignalPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SignalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn signals(&self) -> impl Iterator<Item = Signal> + '_ {
        self.points.iter().map(|p| p.signal)
    }

    /// Last period of the series. `None` only for a series that was never
    /// produced from validated input.
    pub fn latest(&self) -> Option<LatestSignal> {
        self.points.last().map(|p| LatestSignal {
            date: p.date,
            close: p.indicators.close,
            signal: p.signal,
        })
    }

    /// The trailing `n` periods (fewer if the series is shorter).
    pub fn recent(&self, n: usize) -> &[SignalPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    pub fn buys(&self) -> impl Iterator<Item = &SignalPoint> + '_ {
        self.points.iter().filter(|p| p.signal == Signal::Buy)
    }

    pub fn sells(&self) -> impl Iterator<Item = &SignalPoint> + '_ {
        self.points.iter().filter(|p| p.signal == Signal::Sell)
    }

    pub fn summary(&self) -> SignalSummary {
        self.signals()
            .fold(SignalSummary::default(), |mut acc, signal| {
                match signal {
                    Signal::Buy => acc.buy += 1,
                    Signal::Sell => acc.sell += 1,
                    Signal::Hold => acc.hold += 1,
                }
                acc
            })
    }
}
