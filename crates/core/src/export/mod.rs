pub mod manager;
pub mod svg;
