use crate::coords::{Rect, Viewport};
use crate::render::Vertex;
use crate::scene::{DrawCmd, RectCmd};

use super::Placement;

/// Emits a filled rect (6 vertices) or a hollow one as four border quads (24).
///
/// Outlines whose inner rect would be non-positive in either dimension fall
/// back to a filled quad.
pub(crate) fn emit(
    out: &mut Vec<Vertex>,
    cmd: &DrawCmd,
    rect: &RectCmd,
    viewport: Viewport,
    thickness: f32,
) {
    let bounds = cmd.bounds();
    let place = Placement::new(viewport, cmd.pivot_point(), cmd.rotation());
    let color = rect.color.to_array();
    let uv = [0.0; 4];

    if rect.filled {
        place.push_rect(out, bounds, uv, color);
        return;
    }

    let Some(borders) = border_quads(bounds, thickness) else {
        place.push_rect(out, bounds, uv, color);
        return;
    };
    for border in borders {
        place.push_rect(out, border, uv, color);
    }
}

/// Top, bottom, left and right border strips of `r`, or `None` when the
/// border would leave no positive-area interior.
fn border_quads(r: Rect, t: f32) -> Option<[Rect; 4]> {
    let inner_w = r.size.x - 2.0 * t;
    let inner_h = r.size.y - 2.0 * t;
    if inner_w <= 0.0 || inner_h <= 0.0 {
        return None;
    }

    let Rect { origin, size } = r;
    Some([
        Rect::new(origin.x, origin.y, size.x, t),
        Rect::new(origin.x, origin.y + size.y - t, size.x, t),
        Rect::new(origin.x, origin.y + t, t, inner_h),
        Rect::new(origin.x + size.x - t, origin.y + t, t, inner_h),
    ])
}
