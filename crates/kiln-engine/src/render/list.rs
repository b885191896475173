use std::collections::HashSet;

use crate::coords::Viewport;
use crate::scene::{DrawCmd, DrawList, Payload};

use super::shapes;
use super::textures::{AnyTexture, TextureRegistry};
use super::{RenderBatch, Vertex};

/// Border thickness of outlined rects, in pixels.
pub const DEFAULT_OUTLINE_THICKNESS: f32 = 2.0;

/// Batcher configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Border thickness of outlined rects, in pixels.
    pub outline_thickness: f32,
    /// Vertex capacity given to a batch when no recycled buffer is available.
    pub initial_vertex_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            outline_thickness: DEFAULT_OUTLINE_THICKNESS,
            initial_vertex_capacity: 64,
        }
    }
}

/// Counters from the last [`RenderList::fill`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    /// Draw commands visited.
    pub objects: usize,
    pub batches: usize,
    pub vertices: usize,
    /// Commands dropped because their texture is unknown.
    pub dropped: usize,
    /// The frame was skipped because the viewport was unset or zero-sized.
    pub skipped: bool,
}

/// Depth-ordered batches for one frame.
///
/// Batches are rebuilt by every [`fill`](Self::fill); only their vertex
/// allocations are recycled between frames.
#[derive(Debug, Default)]
pub struct RenderList {
    viewport: Viewport,
    batches: Vec<RenderBatch>,
    spare: Vec<Vec<Vertex>>,
    stats: FrameStats,
    /// Unknown texture ids already reported during the current fill.
    warned: HashSet<String>,
    config: RenderConfig,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if `outline_thickness` is negative or not finite.
    pub fn with_config(config: RenderConfig) -> Self {
        assert!(
            config.outline_thickness.is_finite() && config.outline_thickness >= 0.0,
            "outline thickness must be finite and non-negative, got {}",
            config.outline_thickness
        );
        Self { config, ..Self::default() }
    }

    /// Sets the viewport used for NDC conversion. Call before each `fill`.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::from_size(width, height);
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Drops all batches, keeping their vertex buffers for reuse.
    pub fn clear(&mut self) {
        for batch in self.batches.drain(..) {
            self.spare.push(batch.into_vertices());
        }
        self.stats = FrameStats::default();
    }

    /// Rebuilds the batches from `draw_list`, accepting every texture id.
    pub fn fill(&mut self, draw_list: &DrawList) {
        self.fill_with(draw_list, &AnyTexture);
    }

    /// Rebuilds the batches from `draw_list`.
    ///
    /// The draw list is sorted by z-index, then scanned in paint order: each
    /// command extends the current batch when kind, render state and scissor
    /// match, otherwise it opens a new one. Commands whose texture `textures`
    /// does not know are dropped.
    ///
    /// Rotation and pivot apply to textures as well as rects, so a rotated
    /// sprite emits its rotated quad.
    ///
    /// A zero-sized viewport skips the frame: no batches, `stats().skipped`.
    pub fn fill_with(&mut self, draw_list: &DrawList, textures: &dyn TextureRegistry) {
        self.clear();

        if !self.viewport.is_valid() {
            log::warn!(
                "render list viewport is {}x{}; skipping frame of {} draw commands",
                self.viewport.width,
                self.viewport.height,
                draw_list.count()
            );
            self.stats.skipped = true;
            return;
        }

        self.warned.clear();
        draw_list.sort();
        draw_list.visit_in_paint_order(|_, cmd| self.push_command(cmd, textures));

        self.stats.batches = self.batches.len();
        self.stats.vertices = self.batches.iter().map(RenderBatch::vertex_count).sum();
        log::trace!(
            "render list filled: {} objects -> {} batches, {} vertices",
            self.stats.objects,
            self.stats.batches,
            self.stats.vertices
        );
    }

    fn push_command(&mut self, cmd: &DrawCmd, textures: &dyn TextureRegistry) {
        self.stats.objects += 1;

        if let Some(id) = texture_of(cmd) {
            if textures.resolve(id).is_none() {
                self.stats.dropped += 1;
                if self.warned.insert(id.to_owned()) {
                    log::warn!("dropping draw commands for unknown texture {id:?}");
                }
                return;
            }
        }

        if !self.batches.last().is_some_and(|b| b.accepts(cmd)) {
            let buffer = self
                .spare
                .pop()
                .unwrap_or_else(|| Vec::with_capacity(self.config.initial_vertex_capacity));
            self.batches.push(RenderBatch::open(cmd, buffer));
        }

        let viewport = self.viewport;
        let thickness = self.config.outline_thickness;
        let Some(batch) = self.batches.last_mut() else { return };
        let out = batch.append();

        match cmd.payload() {
            Payload::Texture(tex) => shapes::texture::emit(out, cmd, tex, viewport),
            Payload::Rect(rect) => shapes::rect::emit(out, cmd, rect, viewport, thickness),
            Payload::Polyline(line) => shapes::polyline::emit(out, cmd, line, viewport),
            Payload::Mesh(mesh) => shapes::mesh::emit(out, cmd, mesh, viewport),
        }
    }

    #[inline]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// # Panics
    /// Panics if `index >= batch_count()`.
    pub fn get_batch(&self, index: usize) -> &RenderBatch {
        self.batches.get(index).unwrap_or_else(|| {
            panic!("batch index {index} out of range (count {})", self.batches.len())
        })
    }

    /// Batches in draw order.
    #[inline]
    pub fn batches(&self) -> &[RenderBatch] {
        &self.batches
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

fn texture_of(cmd: &DrawCmd) -> Option<&str> {
    match cmd.payload() {
        Payload::Texture(t) => Some(t.texture_id.as_str()),
        Payload::Mesh(m) => m.texture_id.as_deref(),
        Payload::Rect(_) | Payload::Polyline(_) => None,
    }
}
