use tracing::debug;

use crate::models::geometry::{LineSegment, Point};
use crate::models::scene::{
    AxisLabel, Axes, CandleShape, GridLine, HoverState, LegendEntry, MovingAverageKind,
    MovingAverageLine, Scene,
};
use crate::models::series::{PivotSet, Series};
use crate::models::settings::ChartSettings;

use super::candle_geometry::map_candle;
use super::layout::{ChartLayout, VALUE_MAX, VALUE_MIN};
use super::moving_average::MovingAverageService;
use super::pivot_service::PivotService;
use super::tooltip_service::{format_tooltip, format_value, place_tooltip};

pub const VALUE_AXIS_TITLE: &str = "运势指数";
pub const CATEGORY_AXIS_TITLE: &str = "年龄";

pub const LEGEND_MA5: &str = "MA5 (短期动能)";
pub const LEGEND_MA10: &str = "MA10 (大运趋势)";
pub const LEGEND_BULL: &str = "牛市 (吉)";
pub const LEGEND_BEAR: &str = "熊市 (凶)";

/// Distance between the plot edge and axis tick labels.
const LABEL_OFFSET: f64 = 14.0;

/// Composes candles, moving averages, pivots and the tooltip into a scene.
///
/// The composition is a pure function of `(Series, PivotSet, HoverState)`
/// plus settings: every call rebuilds the whole scene, nothing is cached
/// between calls. An empty series still yields grid, axes and legend.
pub struct ChartService {
    moving_average_service: MovingAverageService,
    pivot_service: PivotService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            moving_average_service: MovingAverageService::new(),
            pivot_service: PivotService::new(),
        }
    }

    /// Build the full scene for one render pass.
    #[must_use]
    pub fn compose(
        &self,
        series: &Series,
        pivots: &PivotSet,
        hover: HoverState,
        settings: &ChartSettings,
    ) -> Scene {
        let layout = ChartLayout::new(settings, series.len());

        let candles: Vec<CandleShape> = series
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let bounds = layout.candle_bounds(index, record);
                CandleShape {
                    index,
                    age: record.age,
                    bounds,
                    geometry: map_candle(record, bounds, &settings.candle),
                }
            })
            .collect();

        let ma5 = self.moving_average_line(MovingAverageKind::Ma5, series, &layout, settings);
        let ma10 = self.moving_average_line(MovingAverageKind::Ma10, series, &layout, settings);
        let pivots = self
            .pivot_service
            .place_markers(series, pivots, &layout, settings);

        // A stale index (e.g. from before the data was replaced) reads as idle.
        let hover = match hover.index() {
            Some(i) if i < series.len() => HoverState::Hovering(i),
            _ => HoverState::Idle,
        };
        let tooltip = hover.index().and_then(|i| {
            series
                .get(i)
                .map(|record| place_tooltip(format_tooltip(record), i, &layout, settings))
        });

        debug!(
            records = series.len(),
            markers = pivots.len(),
            hovering = tooltip.is_some(),
            "composed chart scene"
        );

        Scene {
            width: settings.width,
            height: settings.height,
            plot: layout.plot,
            slot_width: layout.slot_width,
            grid: self.grid(&layout, settings),
            axes: self.axes(series, &layout, settings),
            legend: self.legend(settings),
            ma5,
            ma10,
            candles,
            pivots,
            tooltip,
            hover,
            palette: settings.colors.clone(),
            candle_style: settings.candle,
            line_width: settings.line_width,
            records: series.records.clone(),
        }
    }

    /// Evenly spaced tick values over the fixed value domain.
    #[must_use]
    pub fn value_ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![VALUE_MIN],
            n => {
                let step = (VALUE_MAX - VALUE_MIN) / (n - 1) as f64;
                (0..n).map(|i| VALUE_MIN + step * i as f64).collect()
            }
        }
    }

    fn moving_average_line(
        &self,
        kind: MovingAverageKind,
        series: &Series,
        layout: &ChartLayout,
        settings: &ChartSettings,
    ) -> MovingAverageLine {
        let values = if settings.recompute_moving_averages {
            self.moving_average_service.line_values(series, kind)
        } else {
            self.moving_average_service.stored_values(series, kind)
        };

        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| Point::new(layout.slot_center(i), layout.value_to_y(*v)))
            .collect();

        let color = match kind {
            MovingAverageKind::Ma5 => settings.colors.ma5.clone(),
            MovingAverageKind::Ma10 => settings.colors.ma10.clone(),
        };

        MovingAverageLine {
            kind,
            color,
            points,
        }
    }

    fn grid(&self, layout: &ChartLayout, settings: &ChartSettings) -> Vec<GridLine> {
        let plot = layout.plot;
        self.value_ticks(settings.value_ticks)
            .into_iter()
            .map(|value| {
                let y = layout.value_to_y(value);
                GridLine {
                    value,
                    line: LineSegment::new(Point::new(plot.x, y), Point::new(plot.right(), y)),
                }
            })
            .collect()
    }

    fn axes(&self, series: &Series, layout: &ChartLayout, settings: &ChartSettings) -> Axes {
        let plot = layout.plot;

        let value_labels = self
            .value_ticks(settings.value_ticks)
            .into_iter()
            .map(|value| AxisLabel {
                text: format_value(value),
                position: Point::new(plot.x - LABEL_OFFSET / 2.0, layout.value_to_y(value)),
            })
            .collect();

        // Thin the age labels so at most `max_category_labels` are shown.
        let category_labels = if settings.max_category_labels == 0 || series.is_empty() {
            Vec::new()
        } else {
            let step = series.len().div_ceil(settings.max_category_labels);
            series
                .iter()
                .enumerate()
                .step_by(step.max(1))
                .map(|(i, record)| AxisLabel {
                    text: record.age.to_string(),
                    position: Point::new(layout.slot_center(i), plot.bottom() + LABEL_OFFSET),
                })
                .collect()
        };

        Axes {
            value_labels,
            category_labels,
            value_title: VALUE_AXIS_TITLE.to_string(),
            category_title: CATEGORY_AXIS_TITLE.to_string(),
        }
    }

    fn legend(&self, settings: &ChartSettings) -> Vec<LegendEntry> {
        let colors = &settings.colors;
        [
            (LEGEND_MA5, &colors.ma5),
            (LEGEND_MA10, &colors.ma10),
            (LEGEND_BULL, &colors.bull),
            (LEGEND_BEAR, &colors.bear),
        ]
        .into_iter()
        .map(|(label, color)| LegendEntry {
            label: label.to_string(),
            color: color.clone(),
        })
        .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
