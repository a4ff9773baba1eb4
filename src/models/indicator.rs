use serde::{Deserialize, Serialize};

/// Indicator values for one period, aligned with the price series it came from.
///
/// A `None` means the value is undefined at this period: not enough history
/// yet, or (for RSI) an average loss of zero. It is never a stand-in for 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub close: f64,

    /// Short simple moving average (MA20 with default settings)
    pub ma_short: Option<f64>,

    /// Long simple moving average (MA50 with default settings)
    pub ma_long: Option<f64>,

    /// Relative Strength Index in [0, 100]
    pub rsi: Option<f64>,
}

impl IndicatorRecord {
    /// Both moving averages, when both are defined.
    pub fn moving_averages(&self) -> Option<(f64, f64)> {
        self.ma_short.zip(self.ma_long)
    }
}
