pub mod candle_geometry;
pub mod chart_service;
pub mod layout;
pub mod moving_average;
pub mod pivot_service;
pub mod tooltip_service;
pub mod validation_service;
