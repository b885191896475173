use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawHandle, DrawList, Payload};

/// Mesh vertex in the command's local space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshVertex {
    pub position: Vec2,
    pub uv: [f32; 2],
    pub color: Color,
}

impl MeshVertex {
    #[inline]
    pub const fn new(position: Vec2, uv: [f32; 2], color: Color) -> Self {
        Self { position, uv, color }
    }
}

/// Indexed triangle-list payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshCmd {
    pub vertices: Vec<MeshVertex>,
    /// Triangle list; every index is below `vertices.len()`.
    pub indices: Vec<u32>,
    /// `None` for vertex-colored, untextured meshes.
    pub texture_id: Option<String>,
}

impl DrawList {
    /// Turns the command into an indexed mesh.
    ///
    /// # Panics
    /// Panics if `indices` is not a whole number of triangles or references a
    /// vertex past the end of `vertices`.
    pub fn set_mesh(
        &self,
        handle: DrawHandle,
        vertices: &[MeshVertex],
        indices: &[u32],
        texture_id: Option<&str>,
    ) {
        assert!(
            indices.len() % 3 == 0,
            "mesh index count {} is not a multiple of 3",
            indices.len()
        );
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            panic!("mesh index {bad} out of range for {} vertices", vertices.len());
        }

        self.with_mut(handle, |cmd| {
            if let Payload::Mesh(mesh) = &mut cmd.payload {
                mesh.vertices.clear();
                mesh.vertices.extend_from_slice(vertices);
                mesh.indices.clear();
                mesh.indices.extend_from_slice(indices);
                match (&mut mesh.texture_id, texture_id) {
                    (Some(id), Some(s)) => {
                        id.clear();
                        id.push_str(s);
                    }
                    (slot, s) => {
                        if let Some(old) = slot.take() {
                            cmd.recycled.keep_texture_id(old);
                        }
                        *slot = s.map(|s| cmd.recycled.texture_id(s));
                    }
                }
                return;
            }
            let mesh = MeshCmd {
                vertices: cmd.recycled.vertices(vertices),
                indices: cmd.recycled.indices(indices),
                texture_id: texture_id.map(|s| cmd.recycled.texture_id(s)),
            };
            cmd.replace_payload(Payload::Mesh(mesh));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [MeshVertex; 3] {
        [
            MeshVertex::new(Vec2::new(0.0, 0.0), [0.0, 0.0], Color::WHITE),
            MeshVertex::new(Vec2::new(10.0, 0.0), [1.0, 0.0], Color::WHITE),
            MeshVertex::new(Vec2::new(0.0, 10.0), [0.0, 1.0], Color::WHITE),
        ]
    }

    #[test]
    fn set_mesh_stores_geometry() {
        let list = DrawList::new();
        let h = list.request_object();
        list.set_mesh(h, &tri(), &[0, 1, 2], Some("atlas"));

        let cmd = list.command(h);
        assert_eq!(cmd.mesh().indices, [0, 1, 2]);
        assert_eq!(cmd.mesh().texture_id.as_deref(), Some("atlas"));
    }

    #[test]
    #[should_panic(expected = "out of range for 3 vertices")]
    fn index_past_end_panics() {
        let list = DrawList::new();
        let h = list.request_object();
        list.set_mesh(h, &tri(), &[0, 1, 3], None);
    }

    #[test]
    #[should_panic(expected = "not a multiple of 3")]
    fn partial_triangle_panics() {
        let list = DrawList::new();
        let h = list.request_object();
        list.set_mesh(h, &tri(), &[0, 1], None);
    }
}
