use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::shapes::mesh::{MeshCmd, MeshVertex};
use crate::scene::shapes::polyline::PolylineCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::texture::TextureCmd;

use super::ZIndex;

/// Drawable primitive tag.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawKind {
    Texture,
    Rect,
    Polyline,
    Mesh,
}

/// Kind-specific payload of a [`DrawCmd`].
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and in [`DrawKind`]
/// - implement the `DrawList::set_*` mutator inside that shape module
/// - add matching vertex generation under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Texture(TextureCmd),
    Rect(RectCmd),
    Polyline(PolylineCmd),
    Mesh(MeshCmd),
}

impl Payload {
    #[inline]
    pub fn kind(&self) -> DrawKind {
        match self {
            Payload::Texture(_) => DrawKind::Texture,
            Payload::Rect(_) => DrawKind::Rect,
            Payload::Polyline(_) => DrawKind::Polyline,
            Payload::Mesh(_) => DrawKind::Mesh,
        }
    }
}

/// One pooled draw command.
///
/// `bounds.origin` is the command's position. For textures and rects
/// `bounds.size` is the pixel size; polylines and meshes derive their extent
/// from their local-space points, offset by the position.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    pub(crate) bounds: Rect,
    pub(crate) rotation: f32,
    pub(crate) pivot: Vec2,
    pub(crate) z: ZIndex,
    pub(crate) scissor: Option<Rect>,
    pub(crate) payload: Payload,
    /// Buffers of payloads this slot held before, kept for the next `set_*`.
    pub(crate) recycled: Recycled,
}

/// Payload allocations a slot keeps across reservations.
///
/// Invisible to `Clone` (a clone starts empty) and to `PartialEq`.
#[derive(Debug, Default)]
pub(crate) struct Recycled {
    pub(crate) texture_id: String,
    pub(crate) points: Vec<Vec2>,
    pub(crate) vertices: Vec<MeshVertex>,
    pub(crate) indices: Vec<u32>,
}

impl Recycled {
    /// Keeps `payload`'s buffers, emptied.
    fn stash(&mut self, payload: Payload) {
        match payload {
            Payload::Texture(t) => self.keep_texture_id(t.texture_id),
            Payload::Rect(_) => {}
            Payload::Polyline(p) => keep_larger(&mut self.points, p.points),
            Payload::Mesh(m) => {
                keep_larger(&mut self.vertices, m.vertices);
                keep_larger(&mut self.indices, m.indices);
                if let Some(id) = m.texture_id {
                    self.keep_texture_id(id);
                }
            }
        }
    }

    pub(crate) fn keep_texture_id(&mut self, id: String) {
        keep_larger_string(&mut self.texture_id, id);
    }

    /// Returns `s` copied into the recycled id allocation.
    pub(crate) fn texture_id(&mut self, s: &str) -> String {
        let mut id = std::mem::take(&mut self.texture_id);
        id.push_str(s);
        id
    }

    pub(crate) fn points(&mut self, pts: &[Vec2]) -> Vec<Vec2> {
        let mut v = std::mem::take(&mut self.points);
        v.extend_from_slice(pts);
        v
    }

    pub(crate) fn vertices(&mut self, verts: &[MeshVertex]) -> Vec<MeshVertex> {
        let mut v = std::mem::take(&mut self.vertices);
        v.extend_from_slice(verts);
        v
    }

    pub(crate) fn indices(&mut self, idx: &[u32]) -> Vec<u32> {
        let mut v = std::mem::take(&mut self.indices);
        v.extend_from_slice(idx);
        v
    }
}

impl Clone for Recycled {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl PartialEq for Recycled {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

fn keep_larger<T>(slot: &mut Vec<T>, mut buf: Vec<T>) {
    if buf.capacity() > slot.capacity() {
        buf.clear();
        *slot = buf;
    }
}

fn keep_larger_string(slot: &mut String, mut buf: String) {
    if buf.capacity() > slot.capacity() {
        buf.clear();
        *slot = buf;
    }
}

impl Default for DrawCmd {
    fn default() -> Self {
        Self {
            bounds: Rect::default(),
            rotation: 0.0,
            pivot: Vec2::new(0.5, 0.5),
            z: ZIndex::default(),
            scissor: None,
            payload: Payload::Rect(RectCmd::new(Color::TRANSPARENT, true)),
            recycled: Recycled::default(),
        }
    }
}

impl DrawCmd {
    /// Restores the freshly-reserved state: zeroed geometry, centered pivot,
    /// no scissor, transparent filled rect.
    ///
    /// The previous payload's buffers move to [`Recycled`] instead of being freed.
    pub(crate) fn reset(&mut self) {
        self.bounds = Rect::default();
        self.rotation = 0.0;
        self.pivot = Vec2::new(0.5, 0.5);
        self.z = ZIndex::default();
        self.scissor = None;
        self.replace_payload(Payload::Rect(RectCmd::new(Color::TRANSPARENT, true)));
    }

    /// Installs `payload`, recycling the buffers of the one it replaces.
    pub(crate) fn replace_payload(&mut self, payload: Payload) {
        let old = std::mem::replace(&mut self.payload, payload);
        self.recycled.stash(old);
    }

    #[inline]
    pub fn kind(&self) -> DrawKind {
        self.payload.kind()
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.bounds.origin
    }

    /// Rotation in radians about [`pivot_point`](Self::pivot_point).
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Normalized pivot in `[0, 1]²` over [`bounds`](Self::bounds).
    #[inline]
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    #[inline]
    pub fn z_index(&self) -> ZIndex {
        self.z
    }

    #[inline]
    pub fn scissor(&self) -> Option<Rect> {
        self.scissor
    }

    /// Unrotated pixel-space bounding box.
    pub fn bounds(&self) -> Rect {
        let origin = self.bounds.origin;
        let local = match &self.payload {
            Payload::Texture(_) | Payload::Rect(_) => return self.bounds,
            Payload::Polyline(p) => Rect::from_points(p.points.iter().copied()),
            Payload::Mesh(m) => Rect::from_points(m.vertices.iter().map(|v| v.position)),
        };
        match local {
            Some(r) => Rect::from_origin_size(r.origin + origin, r.size),
            None => Rect::from_origin_size(origin, Vec2::zero()),
        }
    }

    /// Pixel-space rotation center.
    #[inline]
    pub fn pivot_point(&self) -> Vec2 {
        self.bounds().pivot_point(self.pivot)
    }

    /// Axis-aligned bounds after rotation about the pivot, for culling and hit-testing.
    #[inline]
    pub fn rotated_aabb(&self) -> Rect {
        self.bounds().rotated_bounds(self.pivot, self.rotation)
    }

    // ── variant access ────────────────────────────────────────────────────

    #[inline]
    pub fn try_texture(&self) -> Option<&TextureCmd> {
        match &self.payload {
            Payload::Texture(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn try_rect(&self) -> Option<&RectCmd> {
        match &self.payload {
            Payload::Rect(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn try_polyline(&self) -> Option<&PolylineCmd> {
        match &self.payload {
            Payload::Polyline(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn try_mesh(&self) -> Option<&MeshCmd> {
        match &self.payload {
            Payload::Mesh(m) => Some(m),
            _ => None,
        }
    }

    /// # Panics
    /// Panics if this command is not a texture.
    pub fn texture(&self) -> &TextureCmd {
        self.try_texture().unwrap_or_else(|| self.wrong_kind(DrawKind::Texture))
    }

    /// # Panics
    /// Panics if this command is not a rect.
    pub fn rect(&self) -> &RectCmd {
        self.try_rect().unwrap_or_else(|| self.wrong_kind(DrawKind::Rect))
    }

    /// # Panics
    /// Panics if this command is not a polyline.
    pub fn polyline(&self) -> &PolylineCmd {
        self.try_polyline().unwrap_or_else(|| self.wrong_kind(DrawKind::Polyline))
    }

    /// # Panics
    /// Panics if this command is not a mesh.
    pub fn mesh(&self) -> &MeshCmd {
        self.try_mesh().unwrap_or_else(|| self.wrong_kind(DrawKind::Mesh))
    }

    #[cold]
    fn wrong_kind(&self, wanted: DrawKind) -> ! {
        panic!("draw command is {:?}, not {:?}", self.kind(), wanted)
    }
}
