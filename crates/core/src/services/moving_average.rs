use crate::models::record::PeriodRecord;
use crate::models::scene::MovingAverageKind;
use crate::models::series::Series;

/// Trailing simple moving average with a prefix-bounded window.
///
/// Output has the same length as `values`. Element `i` is the mean of
/// `values[max(0, i + 1 - window) ..= i]`, so the first `window - 1`
/// outputs average over the shorter prefix instead of being left empty.
/// A window of 0 behaves like a window of 1.
#[must_use]
pub fn compute_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut result = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        let sum: f64 = slice.iter().sum();
        result.push(sum / slice.len() as f64);
    }

    result
}

/// Regenerates and checks the `ma5` / `ma10` columns of a series.
pub struct MovingAverageService;

impl MovingAverageService {
    pub fn new() -> Self {
        Self
    }

    /// Moving average of the close series for the given line.
    #[must_use]
    pub fn line_values(&self, series: &Series, kind: MovingAverageKind) -> Vec<f64> {
        compute_moving_average(&series.closes(), kind.window())
    }

    /// Stored moving-average values, as delivered by the producer.
    #[must_use]
    pub fn stored_values(&self, series: &Series, kind: MovingAverageKind) -> Vec<f64> {
        series.iter().map(|r| kind.value_of(r)).collect()
    }

    /// Copy of `series` with `ma5` and `ma10` rewritten from the closes.
    #[must_use]
    pub fn recompute(&self, series: &Series) -> Series {
        let ma5 = self.line_values(series, MovingAverageKind::Ma5);
        let ma10 = self.line_values(series, MovingAverageKind::Ma10);

        let records: Vec<PeriodRecord> = series
            .iter()
            .zip(ma5.into_iter().zip(ma10))
            .map(|(record, (ma5, ma10))| PeriodRecord {
                ma5,
                ma10,
                ..record.clone()
            })
            .collect();

        Series::new(records)
    }

    /// Ages whose stored average differs from the recomputed one by more
    /// than `tolerance`, with the stored and expected values.
    #[must_use]
    pub fn drift(
        &self,
        series: &Series,
        kind: MovingAverageKind,
        tolerance: f64,
    ) -> Vec<(u32, f64, f64)> {
        let expected = self.line_values(series, kind);
        series
            .iter()
            .zip(expected)
            .filter_map(|(record, expected)| {
                let stored = kind.value_of(record);
                if (stored - expected).abs() > tolerance {
                    Some((record.age, stored, expected))
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for MovingAverageService {
    fn default() -> Self {
        Self::new()
    }
}
