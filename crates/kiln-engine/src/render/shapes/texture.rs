use crate::coords::Viewport;
use crate::paint::Color;
use crate::render::Vertex;
use crate::scene::{DrawCmd, TextureCmd};

use super::Placement;

/// Emits one quad sampling `tex.uv` as given (no flipping), untinted.
///
/// The quad is rotated about the command's pivot like a rect; an unrotated
/// texture keeps its axis-aligned corners exactly.
pub(crate) fn emit(out: &mut Vec<Vertex>, cmd: &DrawCmd, tex: &TextureCmd, viewport: Viewport) {
    let uv = tex.uv;
    Placement::new(viewport, cmd.pivot_point(), cmd.rotation()).push_rect(
        out,
        cmd.bounds(),
        [uv.u0, uv.v0, uv.u1, uv.v1],
        Color::WHITE.to_array(),
    );
}
