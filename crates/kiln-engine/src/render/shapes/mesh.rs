use crate::coords::Viewport;
use crate::render::Vertex;
use crate::scene::{DrawCmd, MeshCmd};

use super::{reserve, Placement};

/// Expands the indexed mesh into a flat triangle list.
///
/// Indices were validated by `DrawList::set_mesh`.
pub(crate) fn emit(out: &mut Vec<Vertex>, cmd: &DrawCmd, mesh: &MeshCmd, viewport: Viewport) {
    let origin = cmd.position();
    let place = Placement::new(viewport, cmd.pivot_point(), cmd.rotation());

    reserve(out, mesh.indices.len());
    for &i in &mesh.indices {
        let v = &mesh.vertices[i as usize];
        out.push(Vertex::new(place.project(origin + v.position), v.uv, v.color.to_array()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::{DrawList, MeshVertex};

    #[test]
    fn shared_vertices_are_expanded() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let verts = [
            MeshVertex::new(Vec2::new(0.0, 0.0), [0.0, 0.0], red),
            MeshVertex::new(Vec2::new(10.0, 0.0), [1.0, 0.0], red),
            MeshVertex::new(Vec2::new(10.0, 10.0), [1.0, 1.0], Color::WHITE),
            MeshVertex::new(Vec2::new(0.0, 10.0), [0.0, 1.0], Color::WHITE),
        ];

        let list = DrawList::new();
        let h = list.request_object();
        list.set_mesh(h, &verts, &[0, 1, 2, 0, 2, 3], Some("atlas"));
        list.set_bounds(h, 50.0, 50.0, 0.0, 0.0);

        let cmd = list.command(h);
        let mut out = Vec::new();
        emit(&mut out, &cmd, cmd.mesh(), Viewport::new(100.0, 100.0));

        assert_eq!(out.len(), 6);
        assert_eq!(out[0].position, [0.0, 0.0]);
        let [x, y] = out[2].position;
        assert!((x - 0.2).abs() < 1e-6 && (y + 0.2).abs() < 1e-6, "{x}, {y}");
        assert_eq!(out[2].uv, [1.0, 1.0]);
        assert_eq!(out[1].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(out[3], out[0]);
    }
}
