use core::ops::{Add, Mul, Sub};

/// 2D vector in pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates `self` about `pivot` given precomputed `sin`/`cos` of the angle.
    ///
    /// `x' = px + cos·dx − sin·dy`, `y' = py + sin·dx + cos·dy`.
    /// With +Y down this turns clockwise on screen for positive angles.
    #[inline]
    pub fn rotated_about(self, pivot: Vec2, sin: f32, cos: f32) -> Vec2 {
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Vec2::new(pivot.x + cos * dx - sin * dy, pivot.y + sin * dx + cos * dy)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn rotate_quarter_turn_about_origin() {
        let (s, c) = core::f32::consts::FRAC_PI_2.sin_cos();
        let p = Vec2::new(1.0, 0.0).rotated_about(Vec2::zero(), s, c);
        assert!(approx(p, Vec2::new(0.0, 1.0)), "{p:?}");
    }

    #[test]
    fn rotate_about_self_is_fixed_point() {
        let (s, c) = 1.234f32.sin_cos();
        let pivot = Vec2::new(7.0, -3.0);
        assert!(approx(pivot.rotated_about(pivot, s, c), pivot));
    }

    #[test]
    fn zero_angle_is_identity() {
        let p = Vec2::new(12.5, 40.0);
        assert_eq!(p.rotated_about(Vec2::new(3.0, 3.0), 0.0, 1.0), p);
    }
}
