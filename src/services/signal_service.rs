use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{
    IndicatorRecord, IndicatorSettings, PricePoint, PriceSeries, Signal, SignalPoint,
    SignalSeries, SignalSettings,
};
use crate::services::indicators::IndicatorEngine;

/// A single classification rule.
///
/// Rules look at the current period and, where it matters, the one before it.
/// Returning `None` means the rule does not apply and the signal decided so far
/// is left alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalRule {
    /// Golden cross -> Buy, death cross -> Sell
    Crossover,
    /// RSI strictly below the threshold -> Buy
    Oversold(f64),
    /// RSI strictly above the threshold -> Sell
    Overbought(f64),
}

impl SignalRule {
    pub fn apply(&self, previous: Option<&IndicatorRecord>, current: &IndicatorRecord) -> Option<Signal> {
        match *self {
            SignalRule::Crossover => {
                let (prev_short, prev_long) = previous?.moving_averages()?;
                let (short, long) = current.moving_averages()?;

                if short > long && prev_short <= prev_long {
                    Some(Signal::Buy)
                } else if short < long && prev_short >= prev_long {
                    Some(Signal::Sell)
                } else {
                    None
                }
            }
            SignalRule::Oversold(threshold) => current
                .rsi
                .filter(|&rsi| rsi < threshold)
                .map(|_| Signal::Buy),
            SignalRule::Overbought(threshold) => current
                .rsi
                .filter(|&rsi| rsi > threshold)
                .map(|_| Signal::Sell),
        }
    }
}

/// Applies `rules` in order, later rules overriding earlier ones, on top of
/// a default of Hold.
pub fn classify_with(rules: &[SignalRule], records: &[IndicatorRecord]) -> Vec<Signal> {
    records
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let previous = i.checked_sub(1).map(|p| &records[p]);
            rules
                .iter()
                .fold(Signal::default(), |signal, rule| {
                    rule.apply(previous, current).unwrap_or(signal)
                })
        })
        .collect()
}

/// Turns a closing-price history into a per-period Buy/Sell/Hold series.
#[derive(Debug, Clone)]
pub struct SignalService {
    engine: IndicatorEngine,
    rules: Vec<SignalRule>,
}

impl Default for SignalService {
    fn default() -> Self {
        let settings = SignalSettings::default();
        Self {
            engine: IndicatorEngine::default(),
            rules: Self::rules_for(&settings),
        }
    }
}

impl SignalService {
    pub fn new(
        indicator_settings: IndicatorSettings,
        signal_settings: SignalSettings,
    ) -> Result<Self, AppError> {
        signal_settings.validate()?;
        Ok(Self {
            engine: IndicatorEngine::new(indicator_settings)?,
            rules: Self::rules_for(&signal_settings),
        })
    }

    // Precedence is the order of this list: overbought beats oversold beats crossover.
    fn rules_for(settings: &SignalSettings) -> Vec<SignalRule> {
        vec![
            SignalRule::Crossover,
            SignalRule::Oversold(settings.oversold),
            SignalRule::Overbought(settings.overbought),
        ]
    }

    pub fn rules(&self) -> &[SignalRule] {
        &self.rules
    }

    /// Classify indicator records that were already computed.
    pub fn classify(&self, records: &[IndicatorRecord]) -> Vec<Signal> {
        classify_with(&self.rules, records)
    }

    /// Validate the raw points, then compute and classify them.
    pub fn analyze(&self, points: Vec<PricePoint>) -> Result<SignalSeries, AppError> {
        let series = PriceSeries::new(points)?;
        Ok(self.generate_signals(&series))
    }

    pub fn generate_signals(&self, series: &PriceSeries) -> SignalSeries {
        let records = self.engine.compute(series);
        let signals = self.classify(&records);

        let points: Vec<SignalPoint> = series
            .points()
            .iter()
            .zip(records)
            .zip(signals)
            .map(|((price, indicators), signal)| SignalPoint {
                date: price.date,
                indicators,
                signal,
            })
            .collect();

        let output = SignalSeries::new(points);
        let summary = output.summary();
        debug!(buy = summary.buy, sell = summary.sell, hold = summary.hold, "classified series");

        if let Some(latest) = output.latest() {
            info!(
                date = %latest.date,
                close = latest.close,
                signal = %latest.signal,
                "latest signal"
            );
        }

        output
    }
}
