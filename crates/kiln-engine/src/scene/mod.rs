//! Scene (draw list) types.
//!
//! Responsibilities:
//! - pool renderer-agnostic draw commands across frames
//! - let several producer threads reserve and fill commands concurrently
//! - provide deterministic paint order (z-index + request order)
//! - keep shape-specific payloads and mutators isolated under `scene::shapes`

mod cmd;
mod handle;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::{DrawCmd, DrawKind, Payload};
pub use handle::{DrawHandle, IndexError};
pub use key::SortKey;
pub use list::{DrawList, DrawListConfig, INITIAL_CAPACITY, SLOT_MAGIC};
pub use shapes::mesh::{MeshCmd, MeshVertex};
pub use shapes::polyline::PolylineCmd;
pub use shapes::rect::RectCmd;
pub use shapes::texture::{TextureCmd, UvRect};
pub use z_index::ZIndex;
