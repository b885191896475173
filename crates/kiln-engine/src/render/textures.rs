use std::collections::HashMap;

/// What the batcher needs to know about a registered texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

/// Resolves texture ids carried by draw commands.
///
/// Implemented by the asset layer; the batcher only asks whether an id is
/// known so it can drop commands that would bind nothing.
pub trait TextureRegistry {
    fn resolve(&self, texture_id: &str) -> Option<TextureInfo>;
}

/// Accepts every id. Used by [`RenderList::fill`](super::RenderList::fill).
#[derive(Debug, Default, Copy, Clone)]
pub struct AnyTexture;

impl TextureRegistry for AnyTexture {
    #[inline]
    fn resolve(&self, _texture_id: &str) -> Option<TextureInfo> {
        Some(TextureInfo { width: 0, height: 0 })
    }
}

/// Fixed id → size table, for tools and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticTextures {
    entries: HashMap<String, TextureInfo>,
}

impl StaticTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, texture_id: impl Into<String>, width: u32, height: u32) -> &mut Self {
        self.entries.insert(texture_id.into(), TextureInfo { width, height });
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TextureRegistry for StaticTextures {
    fn resolve(&self, texture_id: &str) -> Option<TextureInfo> {
        self.entries.get(texture_id).copied()
    }
}
