mod indicator;
mod price_point;
mod settings;
mod signal;

pub use indicator::IndicatorRecord;
pub use price_point::{PricePoint, PriceSeries};
pub use settings::{IndicatorSettings, SignalSettings};
pub use signal::{LatestSignal, Signal, SignalPoint, SignalSeries, SignalSummary};
