use serde::{Deserialize, Serialize};

use super::record::PeriodRecord;

/// Ordered sequence of period records, strictly increasing by age.
///
/// The default scenario covers ages 0 through 80, but nothing here assumes
/// a particular length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    pub records: Vec<PeriodRecord>,
}

impl Series {
    pub fn new(records: Vec<PeriodRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PeriodRecord> {
        self.records.get(index)
    }

    /// Slot index of the record with exactly this age.
    ///
    /// Relies on ages being strictly increasing; negative or missing ages
    /// return `None`.
    #[must_use]
    pub fn index_of_age(&self, age: i64) -> Option<usize> {
        let age = u32::try_from(age).ok()?;
        self.records.binary_search_by_key(&age, |r| r.age).ok()
    }

    /// Close values in series order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.close).collect()
    }

    /// First and last age covered, if any.
    #[must_use]
    pub fn age_span(&self) -> Option<(u32, u32)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.age, last.age)),
            _ => None,
        }
    }
}

impl From<Vec<PeriodRecord>> for Series {
    fn from(records: Vec<PeriodRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a PeriodRecord;
    type IntoIter = std::slice::Iter<'a, PeriodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Ages flagged by the producer as major upward / downward turning points.
///
/// Neither list has to be a subset of the series' ages, and the two may
/// overlap. Nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotSet {
    #[serde(default)]
    pub bull_years: Vec<i64>,

    #[serde(default)]
    pub bear_years: Vec<i64>,
}

impl PivotSet {
    pub fn new(bull_years: Vec<i64>, bear_years: Vec<i64>) -> Self {
        Self {
            bull_years,
            bear_years,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bull_years.is_empty() && self.bear_years.is_empty()
    }
}

/// Payload handed over by the data producer.
///
/// Mirrors the producer's JSON document: `chartData`, `bullYears` and
/// `bearYears`. Any other keys (analysis text, birth chart details) are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInput {
    pub chart_data: Series,

    #[serde(default)]
    pub bull_years: Vec<i64>,

    #[serde(default)]
    pub bear_years: Vec<i64>,
}

impl ChartInput {
    /// Split the payload into the two snapshots the chart renders.
    pub fn into_parts(self) -> (Series, PivotSet) {
        (
            self.chart_data,
            PivotSet::new(self.bull_years, self.bear_years),
        )
    }
}
