use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Window lengths used by the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSettings {
    pub short_window: usize,
    pub long_window: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
            rsi_period: 14,
        }
    }
}

impl IndicatorSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.short_window == 0 || self.long_window == 0 || self.rsi_period == 0 {
            return Err(AppError::Validation(
                "indicator windows must be at least 1".to_string(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(AppError::Validation(format!(
                "short window ({}) must be shorter than long window ({})",
                self.short_window, self.long_window
            )));
        }
        Ok(())
    }
}

/// RSI thresholds for the oversold/overbought overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSettings {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl SignalSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.oversold) || !in_range(self.overbought) {
            return Err(AppError::Validation(
                "RSI thresholds must lie within [0, 100]".to_string(),
            ));
        }
        if self.oversold >= self.overbought {
            return Err(AppError::Validation(format!(
                "oversold threshold ({}) must be below overbought threshold ({})",
                self.oversold, self.overbought
            )));
        }
        Ok(())
    }
}
