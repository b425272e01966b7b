use crate::models::geometry::{column_at, Point, Rect};
use crate::models::record::PeriodRecord;
use crate::models::settings::ChartSettings;

/// Lower bound of the value axis.
pub const VALUE_MIN: f64 = 0.0;

/// Upper bound of the value axis.
pub const VALUE_MAX: f64 = 100.0;

/// Pixel mapping for both axes of one render pass.
///
/// The value axis always spans [`VALUE_MIN`, `VALUE_MAX`] whatever the data
/// range; the category axis gives every record an equal slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub plot: Rect,
    pub slot_count: usize,
    pub slot_width: f64,
    pub bar_gap_ratio: f64,
}

impl ChartLayout {
    pub fn new(settings: &ChartSettings, slot_count: usize) -> Self {
        let plot = settings.plot_area();
        let slot_width = if slot_count == 0 {
            0.0
        } else {
            plot.width / slot_count as f64
        };
        Self {
            plot,
            slot_count,
            slot_width,
            bar_gap_ratio: settings.bar_gap_ratio.clamp(0.0, 0.5),
        }
    }

    /// Vertical pixel position of a value. Values outside the domain map
    /// outside the plot and are left for the surface to clip.
    #[must_use]
    pub fn value_to_y(&self, value: f64) -> f64 {
        let t = (value - VALUE_MIN) / (VALUE_MAX - VALUE_MIN);
        self.plot.bottom() - t * self.plot.height
    }

    /// Full-height column of slot `index`.
    #[must_use]
    pub fn slot_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.plot.x + index as f64 * self.slot_width,
            self.plot.y,
            self.slot_width,
            self.plot.height,
        )
    }

    /// Slot under a pointer position, if inside the plot.
    #[must_use]
    pub fn slot_at(&self, pointer: Point) -> Option<usize> {
        column_at(self.plot, self.slot_width, self.slot_count, pointer)
    }

    #[must_use]
    pub fn slot_center(&self, index: usize) -> f64 {
        self.plot.x + (index as f64 + 0.5) * self.slot_width
    }

    /// Rectangle handed to the candle mapper: the slot minus its category
    /// gap horizontally, `high` to `low` vertically.
    #[must_use]
    pub fn candle_bounds(&self, index: usize, record: &PeriodRecord) -> Rect {
        let gap = self.slot_width * self.bar_gap_ratio;
        let top = self.value_to_y(record.high);
        let bottom = self.value_to_y(record.low);
        Rect::new(
            self.plot.x + index as f64 * self.slot_width + gap,
            top,
            self.slot_width - gap * 2.0,
            (bottom - top).max(0.0),
        )
    }
}
