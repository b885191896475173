//! Vertex generation per draw kind.
//!
//! Every generator works in pixel space, rotates about the command's pivot,
//! then converts to NDC through the frame viewport. Quads are emitted as two
//! triangles `(TL, BL, BR)` and `(TL, BR, TR)`.

pub(crate) mod mesh;
pub(crate) mod polyline;
pub(crate) mod rect;
pub(crate) mod texture;

use crate::coords::{Rect, Vec2, Viewport};
use crate::render::Vertex;

/// Rotations smaller than this take the unrotated path.
const ROTATION_EPSILON: f32 = 1e-6;

/// Pixel → NDC placement for one command.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Placement {
    viewport: Viewport,
    pivot: Vec2,
    sin: f32,
    cos: f32,
    rotated: bool,
}

impl Placement {
    /// `pivot` is in pixels.
    pub(crate) fn new(viewport: Viewport, pivot: Vec2, rotation: f32) -> Self {
        if rotation.abs() < ROTATION_EPSILON {
            Self { viewport, pivot, sin: 0.0, cos: 1.0, rotated: false }
        } else {
            Self::with_matrix(viewport, pivot, rotation)
        }
    }

    /// Always applies the rotation matrix, even for a zero angle.
    pub(crate) fn with_matrix(viewport: Viewport, pivot: Vec2, rotation: f32) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self { viewport, pivot, sin, cos, rotated: true }
    }

    #[inline]
    pub(crate) fn project(&self, p: Vec2) -> [f32; 2] {
        let p = if self.rotated { p.rotated_about(self.pivot, self.sin, self.cos) } else { p };
        self.viewport.to_ndc(p)
    }

    /// Pushes `rect` as two triangles. `uv` is `[u0, v0, u1, v1]` for the
    /// top-left and bottom-right corners.
    pub(crate) fn push_rect(&self, out: &mut Vec<Vertex>, rect: Rect, uv: [f32; 4], color: [f32; 4]) {
        let [u0, v0, u1, v1] = uv;
        self.push_quad(out, rect.corners(), [[u0, v0], [u0, v1], [u1, v1], [u1, v0]], color);
    }

    /// Pushes a quad given as `[TL, BL, BR, TR]`.
    pub(crate) fn push_quad(
        &self,
        out: &mut Vec<Vertex>,
        corners: [Vec2; 4],
        uvs: [[f32; 2]; 4],
        color: [f32; 4],
    ) {
        let ndc = corners.map(|c| self.project(c));
        reserve(out, 6);
        for i in [0, 1, 2, 0, 2, 3] {
            out.push(Vertex::new(ndc[i], uvs[i], color));
        }
    }

    pub(crate) fn push_triangle(&self, out: &mut Vec<Vertex>, points: [Vec2; 3], color: [f32; 4]) {
        reserve(out, 3);
        for p in points {
            out.push(Vertex::new(self.project(p), [0.0, 0.0], color));
        }
    }
}

/// Grows `out` geometrically (×2) so at least `additional` more vertices fit.
pub(crate) fn reserve(out: &mut Vec<Vertex>, additional: usize) {
    let needed = out.len() + additional;
    if needed > out.capacity() {
        let target = needed.max(out.capacity() * 2);
        out.reserve_exact(target - out.len());
    }
}

#[cfg(test)]
pub(crate) fn assert_vertices_close(a: &[Vertex], b: &[Vertex]) {
    assert_eq!(a.len(), b.len(), "vertex counts differ");
    for (i, (va, vb)) in a.iter().zip(b).enumerate() {
        let close = va.position.iter().zip(vb.position).all(|(x, y)| (x - y).abs() < 1e-5)
            && va.uv == vb.uv
            && va.color == vb.color;
        assert!(close, "vertex {i} differs: {va:?} vs {vb:?}");
    }
}
