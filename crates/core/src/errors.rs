use plotters::prelude::DrawingAreaErrorKind;
use thiserror::Error;

/// Unified error type for the fortune-chart-core library.
///
/// Scene composition never fails; only parsing, SVG drawing, file I/O and
/// the opt-in validation pass return `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Drawing ─────────────────────────────────────────────────────
    #[error("Render error: {0}")]
    Render(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Input validation ────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid record at age {age}: {reason}")]
    InvalidRecord { age: u32, reason: String },
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for CoreError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        CoreError::Render(e.to_string())
    }
}
