use crate::errors::CoreError;
use crate::models::scene::Scene;
use crate::models::series::ChartInput;

use super::svg;

/// High-level import/export: producer JSON in, SVG or scene JSON out.
pub struct ExportManager;

impl ExportManager {
    /// Parse the producer's JSON payload (`chartData`, `bullYears`, `bearYears`).
    pub fn load_input_from_str(json: &str) -> Result<ChartInput, CoreError> {
        let input: ChartInput = serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse chart input: {e}")))?;
        Ok(input)
    }

    /// Serialize a scene to JSON, for surfaces that draw it themselves.
    pub fn scene_to_json(scene: &Scene) -> Result<String, CoreError> {
        serde_json::to_string_pretty(scene)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize scene: {e}")))
    }

    /// Load the producer's payload from a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_input_from_file(path: &str) -> Result<ChartInput, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::load_input_from_str(&json)
    }

    /// Write a scene as an SVG document (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_svg_to_file(scene: &Scene, path: &str) -> Result<(), CoreError> {
        let document = svg::render_svg(scene)?;
        std::fs::write(path, document)?;
        Ok(())
    }

    /// Write a scene as pretty-printed JSON (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_scene_json_to_file(scene: &Scene, path: &str) -> Result<(), CoreError> {
        let json = Self::scene_to_json(scene)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
