use serde::{Deserialize, Serialize};

use super::geometry::{column_at, LineSegment, Point, Rect};
use super::record::PeriodRecord;
use super::settings::{CandleStyle, Palette};

/// Up/down color class of a candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandleColor {
    Bull,
    Bear,
}

impl CandleColor {
    /// The one up/down rule used everywhere something gets colored:
    /// a period is up when it closes at or above its open.
    #[must_use]
    pub fn from_open_close(open: f64, close: f64) -> Self {
        if close >= open {
            CandleColor::Bull
        } else {
            CandleColor::Bear
        }
    }

    /// Resolve to a concrete color from the palette.
    #[must_use]
    pub fn resolve<'a>(&self, palette: &'a Palette) -> &'a str {
        match self {
            CandleColor::Bull => &palette.bull,
            CandleColor::Bear => &palette.bear,
        }
    }
}

impl std::fmt::Display for CandleColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandleColor::Bull => write!(f, "bull"),
            CandleColor::Bear => write!(f, "bear"),
        }
    }
}

/// Output of the candle geometry mapper for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    /// Vertical line through the slot center, spanning high to low
    pub wick: LineSegment,

    /// Open-close rectangle, in absolute pixel coordinates
    pub body: Rect,

    pub color: CandleColor,
}

/// A positioned candle in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleShape {
    /// Slot index (position in the series)
    pub index: usize,

    pub age: u32,

    /// Rectangle allotted to this candle: top at `high`, bottom at `low`
    pub bounds: Rect,

    pub geometry: CandleGeometry,
}

/// Which moving average a line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovingAverageKind {
    Ma5,
    Ma10,
}

impl MovingAverageKind {
    /// Trailing window length in periods.
    #[must_use]
    pub fn window(&self) -> usize {
        match self {
            MovingAverageKind::Ma5 => 5,
            MovingAverageKind::Ma10 => 10,
        }
    }

    /// Value stored on a record for this average.
    #[must_use]
    pub fn value_of(&self, record: &PeriodRecord) -> f64 {
        match self {
            MovingAverageKind::Ma5 => record.ma5,
            MovingAverageKind::Ma10 => record.ma10,
        }
    }
}

impl std::fmt::Display for MovingAverageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovingAverageKind::Ma5 => write!(f, "MA5"),
            MovingAverageKind::Ma10 => write!(f, "MA10"),
        }
    }
}

/// Polyline through the slot centers of one moving average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageLine {
    pub kind: MovingAverageKind,
    pub color: String,
    pub points: Vec<Point>,
}

/// Direction of a pivot marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotKind {
    Bull,
    Bear,
}

/// Where the pivot glyph sits relative to the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphPlacement {
    Above,
    Below,
}

/// Vertical reference marker at a flagged age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotMarker {
    pub kind: PivotKind,
    pub age: u32,
    pub index: usize,

    /// Dashed line spanning the full plot height
    pub line: LineSegment,

    pub color: String,
    pub glyph: String,
    pub glyph_position: Point,
    pub placement: GlyphPlacement,
}

/// Horizontal grid line at a value-axis tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub value: f64,
    pub line: LineSegment,
}

/// A text label anchored at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub text: String,
    pub position: Point,
}

/// Tick labels and titles of both axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub value_labels: Vec<AxisLabel>,
    pub category_labels: Vec<AxisLabel>,
    pub value_title: String,
    pub category_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Color role of a tooltip row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTone {
    Neutral,
    Bull,
    Bear,
    Ma5,
    Ma10,
}

impl From<CandleColor> for TooltipTone {
    fn from(color: CandleColor) -> Self {
        match color {
            CandleColor::Bull => TooltipTone::Bull,
            CandleColor::Bear => TooltipTone::Bear,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
    pub tone: TooltipTone,
}

/// Display payload for the inspected record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub age: u32,
    pub year: i32,

    /// e.g. `"35岁 (2025年)"`
    pub title: String,

    /// Open, close, high, low, MA5, MA10, in that order
    pub rows: Vec<TooltipRow>,

    /// Same classification as the candle of this record
    pub close_color: CandleColor,

    /// Quoted summary text
    pub note: String,

    /// Box position within the chart surface; zero-sized until placed
    pub anchor: Rect,
}

/// Transient pointer state. The only mutable state the chart knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "index")]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(usize),
}

impl HoverState {
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering(i) => Some(*i),
        }
    }
}

/// Render layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Grid,
    Ma5,
    Ma10,
    Candles,
    Pivots,
    Tooltip,
}

impl Layer {
    pub const DRAW_ORDER: [Layer; 6] = [
        Layer::Grid,
        Layer::Ma5,
        Layer::Ma10,
        Layer::Candles,
        Layer::Pivots,
        Layer::Tooltip,
    ];
}

/// A fully laid-out chart, ready for any drawing surface.
///
/// Produced in a single pass from `(Series, PivotSet, HoverState)`; holds a
/// copy of the records so hover queries can be answered without the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,

    /// Plot area inside the margins
    pub plot: Rect,

    /// Width of one category slot (0 when there are no records)
    pub slot_width: f64,

    pub grid: Vec<GridLine>,
    pub axes: Axes,
    pub legend: Vec<LegendEntry>,
    pub ma5: MovingAverageLine,
    pub ma10: MovingAverageLine,
    pub candles: Vec<CandleShape>,
    pub pivots: Vec<PivotMarker>,
    pub tooltip: Option<Tooltip>,
    pub hover: HoverState,

    pub palette: Palette,
    pub candle_style: CandleStyle,
    pub line_width: f64,

    pub records: Vec<PeriodRecord>,
}

impl Scene {
    /// Layers present in this scene, back to front.
    #[must_use]
    pub fn layers(&self) -> Vec<Layer> {
        Layer::DRAW_ORDER
            .into_iter()
            .filter(|layer| *layer != Layer::Tooltip || self.tooltip.is_some())
            .collect()
    }

    /// Slot index under the pointer, if the pointer is inside the plot.
    #[must_use]
    pub fn slot_at(&self, pointer: Point) -> Option<usize> {
        column_at(self.plot, self.slot_width, self.records.len(), pointer)
    }

    /// Record under the pointer, if any.
    #[must_use]
    pub fn record_at(&self, pointer: Point) -> Option<&PeriodRecord> {
        self.slot_at(pointer).and_then(|i| self.records.get(i))
    }

    /// Candle drawn for a given age.
    #[must_use]
    pub fn candle_for_age(&self, age: u32) -> Option<&CandleShape> {
        self.candles.iter().find(|c| c.age == age)
    }

    pub fn bull_markers(&self) -> impl Iterator<Item = &PivotMarker> {
        self.pivots.iter().filter(|m| m.kind == PivotKind::Bull)
    }

    pub fn bear_markers(&self) -> impl Iterator<Item = &PivotMarker> {
        self.pivots.iter().filter(|m| m.kind == PivotKind::Bear)
    }
}
