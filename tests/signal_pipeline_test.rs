//! Signal pipeline tests
//!
//! End-to-end checks over the public API: raw closes -> indicators -> signals,
//! plus the CSV-backed price loading path.
//!
//! Several scenarios start from an alternating 10/11 baseline of 60 closes.
//! On that baseline both moving averages sit at exactly 10.5 and RSI at 50, so
//! the close at index 60 alone decides whether a crossover fires and where RSI
//! lands.

use chrono::{Duration, NaiveDate};
use stock_signals::{AppError, IndicatorEngine, PricePoint, PriceSeries, Signal, SignalService};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn points(closes: &[f64]) -> Vec<PricePoint> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c))
        .collect()
}

fn alternating_baseline() -> Vec<f64> {
    (0..60).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect()
}

fn signals_for(closes: &[f64]) -> Vec<Signal> {
    SignalService::default()
        .analyze(points(closes))
        .unwrap()
        .signals()
        .collect()
}

fn only_signal_at(signals: &[Signal], index: usize, expected: Signal) {
    for (i, &s) in signals.iter().enumerate() {
        if i == index {
            assert_eq!(s, expected, "signal at {i}");
        } else {
            assert_eq!(s, Signal::Hold, "signal at {i}");
        }
    }
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn test_empty_series_is_validation_error() {
        let err = SignalService::default().analyze(Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_non_increasing_dates_are_validation_error() {
        let mut input = points(&[10.0, 11.0, 12.0]);
        input[2].date = input[1].date;
        let err = SignalService::default().analyze(input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_single_point_is_hold() {
        let series = SignalService::default().analyze(points(&[42.0])).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest().unwrap().signal, Signal::Hold);
    }
}

// ---------------------------------------------------------------------------
// Indicator availability
// ---------------------------------------------------------------------------

#[cfg(test)]
mod indicator_windows {
    use super::*;

    fn records(len: usize) -> Vec<stock_signals::IndicatorRecord> {
        let closes: Vec<f64> = (0..len).map(|i| 100.0 + ((i * 3) % 7) as f64).collect();
        let series = PriceSeries::new(points(&closes)).unwrap();
        IndicatorEngine::default().compute(&series)
    }

    #[test]
    fn test_short_average_undefined_below_20() {
        assert!(records(19).iter().all(|r| r.ma_short.is_none()));
    }

    #[test]
    fn test_long_average_undefined_below_50() {
        let out = records(49);
        assert!(out.iter().all(|r| r.ma_long.is_none()));
        assert!(out[19].ma_short.is_some());
    }

    #[test]
    fn test_rsi_undefined_below_15() {
        assert!(records(14).iter().all(|r| r.rsi.is_none()));
        assert!(records(15)[14].rsi.is_some());
    }

    #[test]
    fn test_rsi_within_bounds() {
        for r in records(250) {
            if let Some(rsi) = r.rsi {
                assert!((0.0..=100.0).contains(&rsi));
            }
        }
    }

    #[test]
    fn test_output_aligned_with_input() {
        let closes: Vec<f64> = (0..70).map(|i| 50.0 + i as f64 * 0.25).collect();
        let series = SignalService::default().analyze(points(&closes)).unwrap();
        assert_eq!(series.len(), closes.len());
        for (point, input) in series.points().iter().zip(points(&closes)) {
            assert_eq!(point.date, input.date);
            assert_eq!(point.indicators.close, input.close);
        }
    }
}

// ---------------------------------------------------------------------------
// Crossovers and RSI overrides
// ---------------------------------------------------------------------------

#[cfg(test)]
mod classification {
    use super::*;

    #[test]
    fn test_flat_then_rising_fires_single_buy() {
        // 60 flat closes, then a steady climb: no losses, so RSI never defined
        let closes: Vec<f64> = (0..60)
            .map(|_| 10.0)
            .chain((1..=30).map(|i| 10.0 + i as f64))
            .collect();

        let series = SignalService::default().analyze(points(&closes)).unwrap();
        assert!(series.points().iter().all(|p| p.indicators.rsi.is_none()));

        let signals: Vec<Signal> = series.signals().collect();
        only_signal_at(&signals, 60, Signal::Buy);
    }

    #[test]
    fn test_equal_averages_do_not_cross() {
        let signals = signals_for(&alternating_baseline());
        assert!(signals.iter().all(|&s| s == Signal::Hold));
    }

    #[test]
    fn test_golden_cross_with_neutral_rsi() {
        let mut closes = alternating_baseline();
        closes.push(11.5);

        let series = SignalService::default().analyze(points(&closes)).unwrap();
        let rsi = series.points()[60].indicators.rsi.unwrap();
        assert!(rsi > 30.0 && rsi < 70.0, "rsi {rsi}");

        let signals: Vec<Signal> = series.signals().collect();
        only_signal_at(&signals, 60, Signal::Buy);
    }

    #[test]
    fn test_death_cross_with_neutral_rsi() {
        let mut closes = alternating_baseline();
        closes.push(9.5);
        only_signal_at(&signals_for(&closes), 60, Signal::Sell);
    }

    #[test]
    fn test_overbought_beats_golden_cross() {
        // Jump of +8 crosses the averages and pushes RSI to ~71.4
        let mut closes = alternating_baseline();
        closes.push(19.0);

        let series = SignalService::default().analyze(points(&closes)).unwrap();
        let last = series.points()[60];
        let (short, long) = last.indicators.moving_averages().unwrap();
        assert!(short > long);
        assert!(last.indicators.rsi.unwrap() > 70.0);
        assert_eq!(last.signal, Signal::Sell);
    }

    #[test]
    fn test_oversold_beats_death_cross() {
        // Drop to 0.5 crosses the averages down and pushes RSI to ~29.8
        let mut closes = alternating_baseline();
        closes.push(0.5);

        let series = SignalService::default().analyze(points(&closes)).unwrap();
        let last = series.points()[60];
        let (short, long) = last.indicators.moving_averages().unwrap();
        assert!(short < long);
        assert!(last.indicators.rsi.unwrap() < 30.0);
        assert_eq!(last.signal, Signal::Buy);
    }

    #[test]
    fn test_steady_rise_leaves_rsi_undefined_and_hold() {
        // Zero average loss: RSI is undefined rather than 100, so no Sell
        let closes: Vec<f64> = (0..15).map(|i| 86.0 + i as f64).collect();
        let series = SignalService::default().analyze(points(&closes)).unwrap();
        assert_eq!(series.points()[14].indicators.rsi, None);
        assert!(series.signals().all(|s| s == Signal::Hold));
    }

    #[test]
    fn test_steady_fall_gives_zero_rsi_and_buy() {
        // Zero average gain with losses present: RSI is exactly 0 -> oversold
        let closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let series = SignalService::default().analyze(points(&closes)).unwrap();
        assert_eq!(series.points()[14].indicators.rsi, Some(0.0));
        only_signal_at(&series.signals().collect::<Vec<_>>(), 14, Signal::Buy);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let closes: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.05)
            .collect();
        let service = SignalService::default();
        let first = service.analyze(points(&closes)).unwrap();
        let second = service.analyze(points(&closes)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_latest_view() {
        let mut closes = alternating_baseline();
        closes.push(9.5);
        let series = SignalService::default().analyze(points(&closes)).unwrap();

        let latest = series.latest().unwrap();
        assert_eq!(latest.date, points(&closes)[60].date);
        assert_eq!(latest.close, 9.5);
        assert_eq!(latest.signal, Signal::Sell);
        assert_eq!(series.recent(10).len(), 10);
        assert_eq!(series.summary().sell, 1);
    }
}

// ---------------------------------------------------------------------------
// Loading from CSV
// ---------------------------------------------------------------------------

#[cfg(test)]
mod csv_loading {
    use super::*;
    use stock_signals::external::csv_provider::CsvPriceProvider;
    use stock_signals::services::price_service::load_price_series;

    #[tokio::test]
    async fn test_csv_to_signals() {
        let mut closes = alternating_baseline();
        closes.push(11.5);

        let body: String = std::iter::once("Date,Close\n".to_string())
            .chain(points(&closes).iter().map(|p| format!("{},{}\n", p.date, p.close)))
            .collect();

        let dir = std::env::temp_dir().join(format!("stock-signals-it-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("DEMO.NS.csv"), body).unwrap();

        let provider = CsvPriceProvider::new(dir.clone());
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();

        let series = load_price_series(&provider, "DEMO.NS", start, end).await.unwrap();
        let signals = SignalService::default().generate_signals(&series);

        assert_eq!(signals.len(), 61);
        assert_eq!(signals.latest().unwrap().signal, Signal::Buy);
    }

    #[tokio::test]
    async fn test_range_without_rows_is_data_unavailable() {
        let dir = std::env::temp_dir().join(format!("stock-signals-it-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("OLD.csv"), "Date,Close\n2010-01-04,100.0\n").unwrap();

        let provider = CsvPriceProvider::new(dir.clone());
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();

        let err = load_price_series(&provider, "OLD", start, end).await.unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable { .. }));
    }
}
