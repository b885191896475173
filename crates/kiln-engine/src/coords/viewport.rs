use super::Vec2;

/// Viewport size in pixels.
///
/// The batcher uses this as the basis for converting pixel positions to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds a viewport from integer window dimensions.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Converts a pixel position to normalized device coordinates.
    ///
    /// `ndc_x = 2·(x/w) − 1`, `ndc_y = 1 − 2·(y/h)` (Y flipped: screen +Y is down).
    #[inline]
    pub fn to_ndc(self, p: Vec2) -> [f32; 2] {
        [2.0 * (p.x / self.width) - 1.0, 1.0 - 2.0 * (p.y / self.height)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_ndc_extremes() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), [-1.0, 1.0]);
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), [1.0, -1.0]);
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), [0.0, 0.0]);
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::default().is_valid());
        assert!(!Viewport::new(800.0, 0.0).is_valid());
        assert!(Viewport::from_size(1, 1).is_valid());
    }
}
