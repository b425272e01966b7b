use tracing::debug;

use crate::models::geometry::{LineSegment, Point};
use crate::models::scene::{GlyphPlacement, PivotKind, PivotMarker};
use crate::models::series::{PivotSet, Series};
use crate::models::settings::ChartSettings;

use super::layout::ChartLayout;

/// Places the bull/bear reference markers on top of the candle layer.
///
/// Markers are independent of the candles: an age gets a marker whenever a
/// record with that exact age exists, regardless of what that record's
/// candle looks like. Ages without a record are skipped silently.
pub struct PivotService;

impl PivotService {
    pub fn new() -> Self {
        Self
    }

    /// All markers, bull list first, each list in caller order.
    ///
    /// No deduplication: an age listed twice, or in both lists, gets one
    /// marker per occurrence.
    #[must_use]
    pub fn place_markers(
        &self,
        series: &Series,
        pivots: &PivotSet,
        layout: &ChartLayout,
        settings: &ChartSettings,
    ) -> Vec<PivotMarker> {
        let mut markers = Vec::with_capacity(pivots.bull_years.len() + pivots.bear_years.len());

        for age in &pivots.bull_years {
            if let Some(marker) = self.marker(PivotKind::Bull, *age, series, layout, settings) {
                markers.push(marker);
            }
        }
        for age in &pivots.bear_years {
            if let Some(marker) = self.marker(PivotKind::Bear, *age, series, layout, settings) {
                markers.push(marker);
            }
        }

        markers
    }

    fn marker(
        &self,
        kind: PivotKind,
        age: i64,
        series: &Series,
        layout: &ChartLayout,
        settings: &ChartSettings,
    ) -> Option<PivotMarker> {
        let Some(index) = series.index_of_age(age) else {
            debug!(?kind, age, "pivot age not on the category axis, skipping");
            return None;
        };
        let record = series.get(index)?;

        let x = layout.slot_center(index);
        let plot = layout.plot;
        let line = LineSegment::new(Point::new(x, plot.y), Point::new(x, plot.bottom()));

        let (color, glyph, glyph_position, placement) = match kind {
            PivotKind::Bull => (
                settings.colors.bull.clone(),
                settings.bull_glyph.clone(),
                Point::new(x, plot.y - settings.pivot_glyph_offset),
                GlyphPlacement::Above,
            ),
            PivotKind::Bear => (
                settings.colors.bear.clone(),
                settings.bear_glyph.clone(),
                Point::new(x, plot.bottom() + settings.pivot_glyph_offset),
                GlyphPlacement::Below,
            ),
        };

        Some(PivotMarker {
            kind,
            age: record.age,
            index,
            line,
            color,
            glyph,
            glyph_position,
            placement,
        })
    }
}

impl Default for PivotService {
    fn default() -> Self {
        Self::new()
    }
}
