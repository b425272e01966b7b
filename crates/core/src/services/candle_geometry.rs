use crate::models::geometry::{LineSegment, Point, Rect};
use crate::models::record::PeriodRecord;
use crate::models::scene::{CandleColor, CandleGeometry};
use crate::models::settings::CandleStyle;

/// Map one record into a wick and a body inside its allotted rectangle.
///
/// `bounds.y` corresponds to the record's `high` and `bounds.bottom()` to its
/// `low`; the caller has already scaled the value axis. Geometry only, no
/// drawing:
///
/// - the wick runs through the horizontal center over the full height;
/// - the body spans open..close, is never shorter than
///   `style.min_body_height`, and stays inside `bounds` whenever `bounds` is
///   tall enough to hold it;
/// - the body is inset by `style.body_padding` on both sides, at least 1px
///   wide, and horizontally centered;
/// - a period with no range (`high <= low`) collapses onto the mid-height
///   line.
#[must_use]
pub fn map_candle(record: &PeriodRecord, bounds: Rect, style: &CandleStyle) -> CandleGeometry {
    let color = CandleColor::from_open_close(record.open, record.close);
    let center_x = bounds.center_x();

    let body_width = (bounds.width - style.body_padding * 2.0).max(1.0);
    let body_x = bounds.x + (bounds.width - body_width) / 2.0;
    let min_height = style.min_body_height.max(0.0);

    let value_range = record.high - record.low;
    if value_range <= 0.0 {
        let mid = bounds.center_y();
        return CandleGeometry {
            wick: LineSegment::new(Point::new(center_x, mid), Point::new(center_x, mid)),
            body: Rect::new(body_x, mid - min_height / 2.0, body_width, min_height),
            color,
        };
    }

    let pixels_per_unit = bounds.height / value_range;
    let open_offset = (record.high - record.open) * pixels_per_unit;
    let close_offset = (record.high - record.close) * pixels_per_unit;

    let body_height = (open_offset - close_offset).abs().max(min_height);
    let natural_top = open_offset.min(close_offset);

    let body_top = if bounds.height < body_height {
        (bounds.height - body_height) / 2.0
    } else {
        // Padding a near-doji up to the minimum may push it past `low`.
        natural_top.clamp(0.0, bounds.height - body_height)
    };

    CandleGeometry {
        wick: LineSegment::new(
            Point::new(center_x, bounds.y),
            Point::new(center_x, bounds.bottom()),
        ),
        body: Rect::new(body_x, bounds.y + body_top, body_width, body_height),
        color,
    }
}
