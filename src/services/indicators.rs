use tracing::debug;

use crate::errors::AppError;
use crate::models::{IndicatorRecord, IndicatorSettings, PriceSeries};

/// Simple Moving Average (SMA)
/// Returns a vector aligned with `values`:
/// - `None` until enough values exist
/// - `Some(avg)` once `window` values (current one included) are available
///
/// Each window is summed on its own rather than with a running sum, so two
/// windows over identical closes always produce bit-identical averages.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || values.len() < window {
        return vec![None; values.len()];
    }

    std::iter::repeat(None)
        .take(window - 1)
        .chain(
            values
                .windows(window)
                .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
        )
        .collect()
}

/// Relative Strength Index (RSI), simple-average variant
///
/// Calculation:
/// 1. Price changes between consecutive closes (none for the first close)
/// 2. Split into gains and losses
/// 3. Average gain and average loss over the trailing `period` changes (SMA)
/// 4. RSI = 100 - (100 / (1 + avg_gain / avg_loss))
///
/// The first defined value is at index `period`. When the average loss is zero
/// the ratio is undefined and so is the RSI: it stays `None` instead of being
/// pinned to 100.
pub fn rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || prices.len() <= period {
        return vec![None; prices.len()];
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = prices
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let avg_gains = sma(&gains, period);
    let avg_losses = sma(&losses, period);

    std::iter::once(None)
        .chain(
            avg_gains
                .into_iter()
                .zip(avg_losses)
                .map(|pair| match pair {
                    (Some(gain), Some(loss)) if loss > 0.0 => {
                        Some(100.0 - 100.0 / (1.0 + gain / loss))
                    }
                    _ => None,
                }),
        )
        .collect()
}

/// Derives moving averages and RSI for a whole price series in one batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine {
    settings: IndicatorSettings,
}

impl IndicatorEngine {
    pub fn new(settings: IndicatorSettings) -> Result<Self, AppError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }

    /// One record per price point, in the same order.
    pub fn compute(&self, series: &PriceSeries) -> Vec<IndicatorRecord> {
        let closes = series.closes();

        let ma_short = sma(&closes, self.settings.short_window);
        let ma_long = sma(&closes, self.settings.long_window);
        let rsi_values = rsi(&closes, self.settings.rsi_period);

        let records: Vec<IndicatorRecord> = closes
            .iter()
            .zip(ma_short)
            .zip(ma_long)
            .zip(rsi_values)
            .map(|(((&close, ma_short), ma_long), rsi)| IndicatorRecord {
                close,
                ma_short,
                ma_long,
                rsi,
            })
            .collect();

        debug!(
            periods = records.len(),
            defined_ma_long = records.iter().filter(|r| r.ma_long.is_some()).count(),
            defined_rsi = records.iter().filter(|r| r.rsi.is_some()).count(),
            "computed indicators"
        );

        records
    }
}
