use serde::{Deserialize, Serialize};

use super::scene::CandleColor;

/// Direction classification of a period as reported by the data producer.
///
/// This is informational only. Rendering derives its own up/down decision
/// from `close >= open` (see [`CandleColor::from_open_close`]).
///
/// [`CandleColor::from_open_close`]: crate::models::scene::CandleColor::from_open_close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Close above open
    Bull,
    /// Close below open
    Bear,
    /// Close equal to open
    Doji,
}

impl Trend {
    /// Classify a period from its open and close values.
    #[must_use]
    pub fn from_open_close(open: f64, close: f64) -> Self {
        if close > open {
            Trend::Bull
        } else if close < open {
            Trend::Bear
        } else {
            Trend::Doji
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bull => write!(f, "bull"),
            Trend::Bear => write!(f, "bear"),
            Trend::Doji => write!(f, "doji"),
        }
    }
}

/// One age-year sample of the fortune series.
///
/// The producer guarantees `low <= min(open, close) <= max(open, close) <= high`
/// with every value inside `[0, 100]`. The chart does not re-clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Age in years, starting at 0
    pub age: u32,

    /// Calendar year (informational, grows with age)
    pub year: i32,

    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,

    /// Trailing 5-period mean of `close`
    pub ma5: f64,

    /// Trailing 10-period mean of `close`
    pub ma10: f64,

    /// Short free-text note, displayed verbatim
    #[serde(default)]
    pub summary: String,

    /// Producer-side classification (not trusted for rendering)
    pub trend: Trend,
}

impl PeriodRecord {
    /// Build a record, deriving `trend` from open/close and seeding both
    /// moving averages with `close`.
    ///
    /// Useful for tests and for producers that fill the averages later via
    /// [`MovingAverageService::recompute`](crate::services::moving_average::MovingAverageService::recompute).
    pub fn new(
        age: u32,
        year: i32,
        open: f64,
        close: f64,
        high: f64,
        low: f64,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            age,
            year,
            open,
            close,
            high,
            low,
            ma5: close,
            ma10: close,
            summary: summary.into(),
            trend: Trend::from_open_close(open, close),
        }
    }

    /// Visual classification used by candles and the tooltip alike.
    #[must_use]
    pub fn color(&self) -> CandleColor {
        CandleColor::from_open_close(self.open, self.close)
    }

    /// `true` when the period closed at or above its open.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.color() == CandleColor::Bull
    }

    /// High-low span of the period.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
