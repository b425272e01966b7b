use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::geometry::Rect;

/// Space reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 30.0,
            bottom: 20.0,
            left: 40.0,
        }
    }
}

/// Fixed constants of the candle shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandleStyle {
    /// Horizontal inset of the body on each side of its slot
    pub body_padding: f64,

    /// Bodies never get shorter than this, so doji periods stay visible
    pub min_body_height: f64,

    /// Stroke width of the wick
    pub wick_width: f64,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            body_padding: 2.0,
            min_body_height: 2.0,
            wick_width: 1.5,
        }
    }
}

/// Colors used for every layer of the chart.
///
/// Red marks an up period and green a down period (mainland Chinese market
/// convention).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub bull: String,
    pub bear: String,
    pub ma5: String,
    pub ma10: String,
    pub grid: String,
    pub axis: String,
    pub text: String,
    pub tooltip_background: String,
    pub tooltip_border: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bull: "#ef4444".to_string(),
            bear: "#10b981".to_string(),
            ma5: "#eab308".to_string(),
            ma10: "#3b82f6".to_string(),
            grid: "#334155".to_string(),
            axis: "#94a3b8".to_string(),
            text: "#e2e8f0".to_string(),
            tooltip_background: "#0f172a".to_string(),
            tooltip_border: "#334155".to_string(),
        }
    }
}

/// User-configurable chart settings.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Total drawing surface width in pixels
    pub width: f64,

    /// Total drawing surface height in pixels
    pub height: f64,

    pub margin: Margins,

    pub candle: CandleStyle,

    /// Fraction of each category slot left empty on each side of the candle
    pub bar_gap_ratio: f64,

    pub colors: Palette,

    /// Number of value-axis ticks (and horizontal grid lines) over [0, 100]
    pub value_ticks: usize,

    /// Upper bound on category-axis labels; extra ages are thinned out
    pub max_category_labels: usize,

    /// Derive MA lines from closes instead of trusting `ma5` / `ma10`
    pub recompute_moving_averages: bool,

    /// Distance between the plot edge and a pivot glyph
    pub pivot_glyph_offset: f64,

    pub bull_glyph: String,
    pub bear_glyph: String,

    pub line_width: f64,

    pub tooltip_width: f64,
    pub tooltip_height: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin: Margins::default(),
            candle: CandleStyle::default(),
            bar_gap_ratio: 0.1,
            colors: Palette::default(),
            value_ticks: 5,
            max_category_labels: 20,
            recompute_moving_averages: false,
            pivot_glyph_offset: 12.0,
            bull_glyph: "★".to_string(),
            bear_glyph: "⚠".to_string(),
            line_width: 2.0,
            tooltip_width: 160.0,
            tooltip_height: 150.0,
        }
    }
}

impl ChartSettings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// The plot area: the surface minus margins, never negative.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        Rect::new(
            self.margin.left,
            self.margin.top,
            (self.width - self.margin.left - self.margin.right).max(0.0),
            (self.height - self.margin.top - self.margin.bottom).max(0.0),
        )
    }
}
