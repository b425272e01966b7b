pub mod geometry;
pub mod record;
pub mod scene;
pub mod series;
pub mod settings;
