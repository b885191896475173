//! Batching subsystem.
//!
//! [`RenderList`] consumes a [`DrawList`](crate::scene::DrawList) once per
//! frame and reduces it to [`RenderBatch`]es: depth-ordered runs of commands
//! that share kind, render state and scissor, each holding a triangle-list
//! vertex buffer already in NDC.
//!
//! Convention:
//! - command geometry is in pixels (top-left origin, +Y down)
//! - batch vertices are in NDC (+Y up), two triangles per quad

mod batch;
mod list;
mod textures;
mod vertex;

pub(crate) mod shapes;

pub use batch::{BatchState, RenderBatch};
pub use list::{FrameStats, RenderConfig, RenderList, DEFAULT_OUTLINE_THICKNESS};
pub use textures::{AnyTexture, StaticTextures, TextureInfo, TextureRegistry};
pub use vertex::Vertex;
