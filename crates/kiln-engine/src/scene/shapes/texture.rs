use crate::scene::{DrawHandle, DrawList, Payload};

/// Normalized texture coordinates, `(u0, v0)` at the quad's top-left and
/// `(u1, v1)` at its bottom-right.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    /// The whole texture.
    pub const FULL: UvRect = UvRect::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self { u0, v0, u1, v1 }
    }

    /// Sub-rectangle of a `tex_w × tex_h` atlas, in pixels.
    #[inline]
    pub fn from_pixels(x: f32, y: f32, w: f32, h: f32, tex_w: f32, tex_h: f32) -> Self {
        Self::new(x / tex_w, y / tex_h, (x + w) / tex_w, (y + h) / tex_h)
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Textured quad payload. Size comes from the command bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCmd {
    /// Key into the texture registry.
    pub texture_id: String,
    pub uv: UvRect,
}

impl DrawList {
    /// Turns the command into a textured quad sampling `uv` from `texture_id`.
    pub fn set_texture(&self, handle: DrawHandle, texture_id: &str, uv: UvRect) {
        self.with_mut(handle, |cmd| {
            if let Payload::Texture(tex) = &mut cmd.payload {
                tex.texture_id.clear();
                tex.texture_id.push_str(texture_id);
                tex.uv = uv;
                return;
            }
            let texture_id = cmd.recycled.texture_id(texture_id);
            cmd.replace_payload(Payload::Texture(TextureCmd { texture_id, uv }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawKind;

    #[test]
    fn from_pixels_normalizes_against_atlas() {
        let uv = UvRect::from_pixels(32.0, 0.0, 32.0, 16.0, 128.0, 64.0);
        assert_eq!(uv, UvRect::new(0.25, 0.0, 0.5, 0.25));
    }

    #[test]
    fn set_texture_overwrites_previous_kind() {
        let list = DrawList::new();
        let h = list.request_object();
        list.set_texture(h, "hero", UvRect::FULL);
        list.set_texture(h, "tiles", UvRect::new(0.0, 0.0, 0.5, 0.5));

        let cmd = list.command(h);
        assert_eq!(cmd.kind(), DrawKind::Texture);
        assert_eq!(cmd.texture().texture_id, "tiles");
        assert_eq!(cmd.texture().uv, UvRect::new(0.0, 0.0, 0.5, 0.5));
    }
}
