use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle: origin plus size.
///
/// Width and height are expected to be non-negative. Operations that could
/// produce a negative extent clamp it to zero instead. Edge arithmetic
/// saturates at the `i32` bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from an origin and a size vector.
    pub fn from_origin_size(origin: IVec2, size: IVec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Exclusive right edge (`x + width`), saturating.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge (`y + height`), saturating.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Containment test inclusive on all four edges: a point at
    /// `x == right()` or `y == bottom()` is inside.
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Overlapping region of two rectangles, or `None` when they share no
    /// area. Rectangles that only touch along an edge do not intersect.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = self.right().min(other.right()).saturating_sub(x);
        let height = self.bottom().min(other.bottom()).saturating_sub(y);
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Rect::new(x, y, width, height))
    }

    /// True when the overlap has a positive width or height.
    ///
    /// [`Rect::intersect`] already rejects overlaps without area, so in
    /// practice this is "the rectangles share at least one pixel".
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersect(other)
            .is_some_and(|r| r.width > 0 || r.height > 0)
    }

    /// Smallest rectangle covering both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()).saturating_sub(x),
            self.bottom().max(other.bottom()).saturating_sub(y),
        )
    }

    /// Inset by `(left, top, right, bottom)`; width and height clamp at zero.
    pub fn shrink(&self, left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(left),
            self.y.saturating_add(top),
            self.width.saturating_sub(left).saturating_sub(right).max(0),
            self.height.saturating_sub(top).saturating_sub(bottom).max(0),
        )
    }

    /// Same size, origin moved by `delta`.
    pub fn translated(&self, delta: IVec2) -> Rect {
        let origin = self.origin().saturating_add(delta);
        Rect::new(origin.x, origin.y, self.width, self.height)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}
