use serde::{Deserialize, Serialize};

/// A position in pixel space. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel space, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Inclusive on all edges so a pointer resting on the border still hits.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        let dx = self.to.x - self.from.x;
        let dy = self.to.y - self.from.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Split into `dash`-long pieces separated by `gap`, starting with a
    /// dash at `from`. The last piece is cut short at `to`.
    #[must_use]
    pub fn dashes(&self, dash: f64, gap: f64) -> Vec<LineSegment> {
        let length = self.length();
        if length == 0.0 || dash <= 0.0 {
            return vec![*self];
        }

        let ux = (self.to.x - self.from.x) / length;
        let uy = (self.to.y - self.from.y) / length;
        let at = |d: f64| Point::new(self.from.x + ux * d, self.from.y + uy * d);

        let mut pieces = Vec::new();
        let mut start = 0.0;
        while start < length {
            let end = (start + dash).min(length);
            pieces.push(LineSegment::new(at(start), at(end)));
            start = end + gap.max(0.0);
        }
        pieces
    }
}

/// Index of the evenly sized column of `plot` under `pointer`.
///
/// `None` outside the plot or when there are no columns. The right edge
/// belongs to the last column.
#[must_use]
pub fn column_at(plot: Rect, column_width: f64, count: usize, pointer: Point) -> Option<usize> {
    if count == 0 || column_width <= 0.0 || !plot.contains(pointer) {
        return None;
    }
    let raw = ((pointer.x - plot.x) / column_width).floor();
    Some((raw.max(0.0) as usize).min(count - 1))
}
