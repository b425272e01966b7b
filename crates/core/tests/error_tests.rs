// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use fortune_chart_core::errors::CoreError;
use plotters::prelude::DrawingAreaErrorKind;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("scene too large".into());
        assert_eq!(err.to_string(), "Serialization error: scene too large");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("ages out of order".into());
        assert_eq!(err.to_string(), "Validation failed: ages out of order");
    }

    #[test]
    fn render() {
        let err = CoreError::Render("backend closed".into());
        assert_eq!(err.to_string(), "Render error: backend closed");
    }

    #[test]
    fn invalid_record() {
        let err = CoreError::InvalidRecord {
            age: 42,
            reason: "low above open".into(),
        };
        assert_eq!(err.to_string(), "Invalid record at age 42: low above open");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("no such file")),
            other => panic!("expected FileIO, got {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_drawing_area_error() {
        let drawing: DrawingAreaErrorKind<std::io::Error> = DrawingAreaErrorKind::LayoutError;
        let err: CoreError = drawing.into();
        assert!(matches!(err, CoreError::Render(_)));
    }

    #[test]
    fn question_mark_converts_io() {
        fn read_missing() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here/chart.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CoreError>();
    }
}
