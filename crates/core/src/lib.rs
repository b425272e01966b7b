pub mod errors;
pub mod export;
pub mod models;
pub mod services;

use export::manager::ExportManager;
use models::{
    geometry::Point,
    record::PeriodRecord,
    scene::{HoverState, Scene},
    series::{ChartInput, PivotSet, Series},
    settings::ChartSettings,
};
use services::{
    chart_service::ChartService,
    layout::ChartLayout,
    moving_average::MovingAverageService,
    validation_service::{MovingAverageDrift, ValidationService, DEFAULT_MA_TOLERANCE},
};

use errors::CoreError;

/// Main entry point for the fortune chart core library.
///
/// Holds the current data snapshot, the chart settings and the transient
/// hover state. Every [`FortuneChart::scene`] call recomposes the chart
/// from scratch; the snapshot itself is never mutated in place, only
/// replaced.
#[must_use]
pub struct FortuneChart {
    series: Series,
    pivots: PivotSet,
    settings: ChartSettings,
    hover: HoverState,
    chart_service: ChartService,
    moving_average_service: MovingAverageService,
    validation_service: ValidationService,
}

impl std::fmt::Debug for FortuneChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FortuneChart")
            .field("records", &self.series.len())
            .field("bull_pivots", &self.pivots.bull_years.len())
            .field("bear_pivots", &self.pivots.bear_years.len())
            .field("hover", &self.hover)
            .finish()
    }
}

impl FortuneChart {
    /// Create a chart over the given snapshot with default settings.
    pub fn new(series: Series, pivots: PivotSet) -> Self {
        Self::build(series, pivots, ChartSettings::default())
    }

    /// Create a chart with nothing to plot.
    pub fn empty() -> Self {
        Self::new(Series::default(), PivotSet::default())
    }

    /// Create a chart from the producer's payload.
    pub fn from_input(input: ChartInput) -> Self {
        let (series, pivots) = input.into_parts();
        Self::new(series, pivots)
    }

    /// Create a chart from the producer's JSON payload.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let input = ExportManager::load_input_from_str(json)?;
        Ok(Self::from_input(input))
    }

    /// Load the producer's JSON payload from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let input = ExportManager::load_input_from_file(path)?;
        Ok(Self::from_input(input))
    }

    // ── Data ────────────────────────────────────────────────────────

    /// Replace the snapshot. Hover state resets to idle.
    pub fn set_data(&mut self, series: Series, pivots: PivotSet) {
        self.series = series;
        self.pivots = pivots;
        self.hover = HoverState::Idle;
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn pivots(&self) -> &PivotSet {
        &self.pivots
    }

    /// Replace the snapshot with a copy whose `ma5`/`ma10` are derived
    /// from the closes.
    pub fn recompute_moving_averages(&mut self) {
        let recomputed = self.moving_average_service.recompute(&self.series);
        self.series = recomputed;
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ChartSettings) {
        self.settings = settings;
    }

    /// Builder-style variant of [`FortuneChart::set_settings`].
    pub fn with_settings(mut self, settings: ChartSettings) -> Self {
        self.settings = settings;
        self
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Compose the scene for the current snapshot and hover state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.chart_service
            .compose(&self.series, &self.pivots, self.hover, &self.settings)
    }

    /// Render the current scene as an SVG document.
    pub fn to_svg(&self) -> Result<String, CoreError> {
        export::svg::render_svg(&self.scene())
    }

    /// Serialize the current scene to JSON.
    pub fn scene_to_json(&self) -> Result<String, CoreError> {
        ExportManager::scene_to_json(&self.scene())
    }

    /// Write the current scene as SVG (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_svg_to_file(&self, path: &str) -> Result<(), CoreError> {
        ExportManager::save_svg_to_file(&self.scene(), path)
    }

    // ── Hover / Selection ───────────────────────────────────────────

    /// Record under a pointer position, without touching hover state.
    #[must_use]
    pub fn record_at(&self, pointer: Point) -> Option<&PeriodRecord> {
        self.slot_at(pointer).and_then(|i| self.series.get(i))
    }

    /// Handle a pointer move. The target is derived from the position
    /// alone and overwrites any previous hover, so out-of-order or bursty
    /// events settle on the last one. Leaving the plot area goes idle.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<&PeriodRecord> {
        self.hover = match self.slot_at(pointer) {
            Some(i) => HoverState::Hovering(i),
            None => HoverState::Idle,
        };
        self.hovered_record()
    }

    /// Handle the pointer leaving the chart.
    pub fn pointer_leave(&mut self) {
        self.hover = HoverState::Idle;
    }

    /// Select a record by age (keyboard or programmatic inspection).
    /// Returns `None` and goes idle when no record has that age.
    pub fn select_age(&mut self, age: u32) -> Option<&PeriodRecord> {
        self.hover = match self.series.index_of_age(i64::from(age)) {
            Some(i) => HoverState::Hovering(i),
            None => HoverState::Idle,
        };
        self.hovered_record()
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn hovered_record(&self) -> Option<&PeriodRecord> {
        self.hover.index().and_then(|i| self.series.get(i))
    }

    // ── Validation ──────────────────────────────────────────────────

    /// Check the snapshot against the producer's contract.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.validation_service.validate_series(&self.series)
    }

    /// Ages whose `trend` field disagrees with open/close.
    #[must_use]
    pub fn trend_mismatches(&self) -> Vec<u32> {
        self.validation_service.trend_mismatches(&self.series)
    }

    /// Stored moving averages that drift from the closes by more than the
    /// default tolerance.
    #[must_use]
    pub fn moving_average_drift(&self) -> Vec<MovingAverageDrift> {
        self.validation_service
            .moving_average_drift(&self.series, DEFAULT_MA_TOLERANCE)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn slot_at(&self, pointer: Point) -> Option<usize> {
        ChartLayout::new(&self.settings, self.series.len()).slot_at(pointer)
    }

    fn build(series: Series, pivots: PivotSet, settings: ChartSettings) -> Self {
        Self {
            series,
            pivots,
            settings,
            hover: HoverState::Idle,
            chart_service: ChartService::new(),
            moving_average_service: MovingAverageService::new(),
            validation_service: ValidationService::new(),
        }
    }
}
