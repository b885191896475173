use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawHandle, DrawList, Payload};

/// Open polyline payload.
///
/// Points are local to the command position. A visible `fill` fills the
/// polygon the points span (fan from the first point, so it should be convex);
/// a visible `stroke` with positive `stroke_width` draws each segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineCmd {
    pub points: Vec<Vec2>,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl DrawList {
    /// Turns the command into a polyline.
    ///
    /// # Panics
    /// Panics if `points` exceeds [`DrawListConfig::max_polyline_points`](crate::scene::DrawListConfig)
    /// or `stroke_width` is negative or NaN.
    pub fn set_polyline(
        &self,
        handle: DrawHandle,
        points: &[Vec2],
        fill: Color,
        stroke: Color,
        stroke_width: f32,
    ) {
        let max = self.config().max_polyline_points;
        assert!(
            points.len() <= max,
            "polyline has {} points, limit is {max}",
            points.len()
        );
        assert!(stroke_width >= 0.0, "stroke width must be non-negative, got {stroke_width}");

        self.with_mut(handle, |cmd| {
            if let Payload::Polyline(line) = &mut cmd.payload {
                line.points.clear();
                line.points.extend_from_slice(points);
                line.fill = fill;
                line.stroke = stroke;
                line.stroke_width = stroke_width;
                return;
            }
            let points = cmd.recycled.points(points);
            cmd.replace_payload(Payload::Polyline(PolylineCmd { points, fill, stroke, stroke_width }));
        });
    }
}
