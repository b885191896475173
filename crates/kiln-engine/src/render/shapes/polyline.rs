use crate::coords::{Vec2, Viewport};
use crate::render::Vertex;
use crate::scene::{DrawCmd, PolylineCmd};

use super::Placement;

/// Emits the fill fan (`3·(n−2)` vertices) then one stroke quad per
/// non-degenerate segment (6 each).
pub(crate) fn emit(out: &mut Vec<Vertex>, cmd: &DrawCmd, line: &PolylineCmd, viewport: Viewport) {
    let origin = cmd.position();
    let place = Placement::new(viewport, cmd.pivot_point(), cmd.rotation());
    let pts = &line.points;

    if line.fill.is_visible() && pts.len() >= 3 {
        let color = line.fill.to_array();
        let first = origin + pts[0];
        for pair in pts[1..].windows(2) {
            place.push_triangle(out, [first, origin + pair[0], origin + pair[1]], color);
        }
    }

    if line.stroke.is_visible() && line.stroke_width > 0.0 {
        let color = line.stroke.to_array();
        let half = line.stroke_width * 0.5;
        for seg in pts.windows(2) {
            let (a, b) = (origin + seg[0], origin + seg[1]);
            let d = b - a;
            let len = (d.x * d.x + d.y * d.y).sqrt();
            if len <= f32::EPSILON {
                continue;
            }
            let n = Vec2::new(-d.y, d.x) * (half / len);
            place.push_quad(out, [a + n, a - n, b - n, b + n], [[0.0, 0.0]; 4], color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::DrawList;

    const VP: Viewport = Viewport::new(100.0, 100.0);

    fn run(points: &[Vec2], fill: Color, stroke: Color, width: f32) -> Vec<Vertex> {
        let list = DrawList::new();
        let h = list.request_object();
        list.set_polyline(h, points, fill, stroke, width);
        list.set_bounds(h, 10.0, 10.0, 0.0, 0.0);
        let cmd = list.command(h);
        let mut out = Vec::new();
        emit(&mut out, &cmd, cmd.polyline(), VP);
        out
    }

    fn square() -> [Vec2; 4] {
        [Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), Vec2::new(20.0, 20.0), Vec2::new(0.0, 20.0)]
    }

    #[test]
    fn stroke_only_emits_quad_per_segment() {
        let out = run(&square(), Color::TRANSPARENT, Color::WHITE, 2.0);
        assert_eq!(out.len(), 3 * 6);
    }

    #[test]
    fn fill_only_emits_fan() {
        let out = run(&square(), Color::WHITE, Color::TRANSPARENT, 2.0);
        assert_eq!(out.len(), 2 * 3);
        // Fan anchored at the first point, offset by the position.
        assert_eq!(out[0].position, VP.to_ndc(Vec2::new(10.0, 10.0)));
        assert_eq!(out[3].position, VP.to_ndc(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn degenerate_segments_are_skipped() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        let out = run(&pts, Color::TRANSPARENT, Color::WHITE, 1.0);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn horizontal_stroke_has_requested_width() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0)];
        let out = run(&pts, Color::TRANSPARENT, Color::WHITE, 4.0);
        // Pixel height of 4 maps to 0.08 NDC on a 100px viewport.
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        let span = ys.iter().cloned().fold(f32::MIN, f32::max)
            - ys.iter().cloned().fold(f32::MAX, f32::min);
        assert!((span - 0.08).abs() < 1e-5, "{span}");
    }

    #[test]
    fn single_point_emits_nothing() {
        assert!(run(&[Vec2::new(1.0, 1.0)], Color::WHITE, Color::WHITE, 2.0).is_empty());
    }
}
