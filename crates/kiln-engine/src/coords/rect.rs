use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Smallest rectangle containing every point. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Self::from_origin_size(min, max - min))
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Corners in `[top-left, bottom-left, bottom-right, top-right]` order.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [min, Vec2::new(min.x, max.y), max, Vec2::new(max.x, min.y)]
    }

    /// Maps a normalized pivot (`[0, 1]²` over this rect) to a pixel position.
    #[inline]
    pub fn pivot_point(self, pivot: Vec2) -> Vec2 {
        Vec2::new(
            self.origin.x + pivot.x * self.size.x,
            self.origin.y + pivot.y * self.size.y,
        )
    }

    /// Axis-aligned bounds of this rect after rotating it by `rotation` radians about
    /// `pivot` (normalized over the rect).
    ///
    /// Angles below `1e-6` in magnitude return the rect unchanged.
    pub fn rotated_bounds(self, pivot: Vec2, rotation: f32) -> Rect {
        if rotation.abs() < 1e-6 {
            return self;
        }
        let center = self.pivot_point(pivot);
        let (sin, cos) = rotation.sin_cos();
        Rect::from_points(self.corners().map(|c| c.rotated_about(center, sin, cos)))
            .unwrap_or(self)
    }
}
