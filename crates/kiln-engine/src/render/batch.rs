use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawKind, Payload};

use super::Vertex;

/// Render state shared by every command in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchState {
    Texture { texture_id: String },
    Rect { color: Color, filled: bool },
    Polyline,
    Mesh { texture_id: Option<String> },
}

impl BatchState {
    /// Captures the state `cmd` needs bound.
    pub(crate) fn of(cmd: &DrawCmd) -> Self {
        match cmd.payload() {
            Payload::Texture(t) => BatchState::Texture { texture_id: t.texture_id.clone() },
            Payload::Rect(r) => BatchState::Rect { color: r.color, filled: r.filled },
            Payload::Polyline(_) => BatchState::Polyline,
            Payload::Mesh(m) => BatchState::Mesh { texture_id: m.texture_id.clone() },
        }
    }

    #[inline]
    pub fn kind(&self) -> DrawKind {
        match self {
            BatchState::Texture { .. } => DrawKind::Texture,
            BatchState::Rect { .. } => DrawKind::Rect,
            BatchState::Polyline => DrawKind::Polyline,
            BatchState::Mesh { .. } => DrawKind::Mesh,
        }
    }

    /// Whether `cmd` can join a batch in this state. Polylines and meshes
    /// always get a batch of their own.
    fn admits(&self, cmd: &DrawCmd) -> bool {
        match (self, cmd.payload()) {
            (BatchState::Texture { texture_id }, Payload::Texture(t)) => *texture_id == t.texture_id,
            (BatchState::Rect { color, filled }, Payload::Rect(r)) => {
                *color == r.color && *filled == r.filled
            }
            _ => false,
        }
    }
}

/// A run of consecutive, state-compatible commands reduced to one vertex
/// buffer: one draw call for the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBatch {
    state: BatchState,
    scissor: Option<Rect>,
    vertices: Vec<Vertex>,
    object_count: usize,
}

impl RenderBatch {
    /// Opens a batch for `cmd`, reusing `vertices`' allocation.
    pub(crate) fn open(cmd: &DrawCmd, mut vertices: Vec<Vertex>) -> Self {
        vertices.clear();
        Self { state: BatchState::of(cmd), scissor: cmd.scissor(), vertices, object_count: 0 }
    }

    /// `true` if `cmd` shares this batch's state and scissor.
    #[inline]
    pub(crate) fn accepts(&self, cmd: &DrawCmd) -> bool {
        self.scissor == cmd.scissor() && self.state.admits(cmd)
    }

    /// Buffer to append `cmd`'s vertices to; counts the command.
    #[inline]
    pub(crate) fn append(&mut self) -> &mut Vec<Vertex> {
        self.object_count += 1;
        &mut self.vertices
    }

    pub(crate) fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    #[inline]
    pub fn kind(&self) -> DrawKind {
        self.state.kind()
    }

    #[inline]
    pub fn state(&self) -> &BatchState {
        &self.state
    }

    /// Texture to bind, if any.
    pub fn texture_id(&self) -> Option<&str> {
        match &self.state {
            BatchState::Texture { texture_id } => Some(texture_id.as_str()),
            BatchState::Mesh { texture_id } => texture_id.as_deref(),
            BatchState::Rect { .. } | BatchState::Polyline => None,
        }
    }

    /// Clip rect the backend must apply for this draw call.
    #[inline]
    pub fn scissor(&self) -> Option<Rect> {
        self.scissor
    }

    /// Triangle-list vertices in NDC.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex data ready for upload, laid out as [`Vertex::layout`].
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Draw commands merged into this batch.
    #[inline]
    pub fn object_count(&self) -> usize {
        self.object_count
    }
}
