use crate::models::geometry::Rect;
use crate::models::record::PeriodRecord;
use crate::models::scene::{Tooltip, TooltipRow, TooltipTone};
use crate::models::settings::ChartSettings;

use super::layout::ChartLayout;

pub const LABEL_OPEN: &str = "开盘";
pub const LABEL_CLOSE: &str = "收盘";
pub const LABEL_HIGH: &str = "最高";
pub const LABEL_LOW: &str = "最低";
pub const LABEL_MA5: &str = "MA5";
pub const LABEL_MA10: &str = "MA10";

/// Gap between the hovered slot and the tooltip box.
const ANCHOR_GAP: f64 = 10.0;

/// Format the inspector payload for one record.
///
/// The close row takes the same color class as the record's candle.
#[must_use]
pub fn format_tooltip(record: &PeriodRecord) -> Tooltip {
    let close_color = record.color();

    let row = |label: &str, value: f64, tone: TooltipTone| TooltipRow {
        label: label.to_string(),
        value: format_value(value),
        tone,
    };

    Tooltip {
        age: record.age,
        year: record.year,
        title: format!("{}岁 ({}年)", record.age, record.year),
        rows: vec![
            row(LABEL_OPEN, record.open, TooltipTone::Neutral),
            row(LABEL_CLOSE, record.close, close_color.into()),
            row(LABEL_HIGH, record.high, TooltipTone::Neutral),
            row(LABEL_LOW, record.low, TooltipTone::Neutral),
            row(LABEL_MA5, record.ma5, TooltipTone::Ma5),
            row(LABEL_MA10, record.ma10, TooltipTone::Ma10),
        ],
        close_color,
        note: format!("\"{}\"", record.summary),
        anchor: Rect::default(),
    }
}

/// At most two decimals with trailing zeros dropped: `60`, `57.5`,
/// `56.67` for a recomputed 56.666….
#[must_use]
pub fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Keeps tiny negatives from printing as "-0".
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

/// Position the tooltip box next to slot `index`.
///
/// Prefers the right of the slot and flips left when it would leave the
/// surface; the box is finally clamped inside the surface.
#[must_use]
pub fn place_tooltip(
    mut tooltip: Tooltip,
    index: usize,
    layout: &ChartLayout,
    settings: &ChartSettings,
) -> Tooltip {
    let width = settings.tooltip_width;
    let height = settings.tooltip_height;
    let slot = layout.slot_rect(index);

    let mut x = slot.right() + ANCHOR_GAP;
    if x + width > settings.width {
        x = slot.x - ANCHOR_GAP - width;
    }
    let x = x.clamp(0.0, (settings.width - width).max(0.0));
    let y = (layout.plot.y + ANCHOR_GAP).clamp(0.0, (settings.height - height).max(0.0));

    tooltip.anchor = Rect::new(x, y, width, height);
    tooltip
}
