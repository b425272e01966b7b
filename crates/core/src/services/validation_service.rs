use tracing::warn;

use crate::errors::CoreError;
use crate::models::record::{PeriodRecord, Trend};
use crate::models::scene::MovingAverageKind;
use crate::models::series::Series;
use crate::services::layout::{VALUE_MAX, VALUE_MIN};

use super::moving_average::MovingAverageService;

/// Default tolerance when comparing stored and recomputed moving averages.
/// Producers commonly round to one or two decimals.
pub const DEFAULT_MA_TOLERANCE: f64 = 0.05;

/// A stored moving average that disagrees with the close series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverageDrift {
    pub age: u32,
    pub kind: MovingAverageKind,
    pub stored: f64,
    pub expected: f64,
}

/// Opt-in checks of the producer's contract.
///
/// Rendering never calls this; it exists for hosts that want to reject or
/// report bad input before showing it.
pub struct ValidationService {
    moving_average_service: MovingAverageService,
}

impl ValidationService {
    pub fn new() -> Self {
        Self {
            moving_average_service: MovingAverageService::new(),
        }
    }

    /// Check the structural invariants of every record, stopping at the
    /// first violation:
    /// - all numeric fields are finite;
    /// - open/close/high/low lie in [0, 100];
    /// - `low <= min(open, close) <= max(open, close) <= high`;
    /// - ages are strictly increasing.
    pub fn validate_series(&self, series: &Series) -> Result<(), CoreError> {
        let mut previous_age: Option<u32> = None;

        for record in series {
            self.validate_record(record)?;

            if let Some(prev) = previous_age {
                if record.age <= prev {
                    return Err(CoreError::ValidationError(format!(
                        "Ages must be strictly increasing: {} follows {prev}",
                        record.age
                    )));
                }
            }
            previous_age = Some(record.age);
        }

        Ok(())
    }

    /// Check a single record's numeric invariants.
    pub fn validate_record(&self, record: &PeriodRecord) -> Result<(), CoreError> {
        let invalid = |reason: String| CoreError::InvalidRecord {
            age: record.age,
            reason,
        };

        let fields = [
            ("open", record.open),
            ("close", record.close),
            ("high", record.high),
            ("low", record.low),
            ("ma5", record.ma5),
            ("ma10", record.ma10),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(format!("{name} is not a finite number")));
            }
        }

        for (name, value) in &fields[..4] {
            if *value < VALUE_MIN || *value > VALUE_MAX {
                return Err(invalid(format!(
                    "{name} = {value} is outside [{VALUE_MIN}, {VALUE_MAX}]"
                )));
            }
        }

        let body_low = record.open.min(record.close);
        let body_high = record.open.max(record.close);
        if record.low > body_low || body_high > record.high {
            return Err(invalid(format!(
                "expected low <= open/close <= high, got low={} open={} close={} high={}",
                record.low, record.open, record.close, record.high
            )));
        }

        Ok(())
    }

    /// Ages whose `trend` field disagrees with their open/close values.
    #[must_use]
    pub fn trend_mismatches(&self, series: &Series) -> Vec<u32> {
        let mismatches: Vec<u32> = series
            .iter()
            .filter(|r| r.trend != Trend::from_open_close(r.open, r.close))
            .map(|r| r.age)
            .collect();

        if !mismatches.is_empty() {
            warn!(ages = ?mismatches, "trend field disagrees with open/close");
        }
        mismatches
    }

    /// Stored MA5/MA10 values farther than `tolerance` from a recomputation.
    #[must_use]
    pub fn moving_average_drift(&self, series: &Series, tolerance: f64) -> Vec<MovingAverageDrift> {
        let mut drift = Vec::new();

        for kind in [MovingAverageKind::Ma5, MovingAverageKind::Ma10] {
            for (age, stored, expected) in self.moving_average_service.drift(series, kind, tolerance) {
                drift.push(MovingAverageDrift {
                    age,
                    kind,
                    stored,
                    expected,
                });
            }
        }

        if !drift.is_empty() {
            warn!(count = drift.len(), tolerance, "stored moving averages drift from closes");
        }
        drift
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}
