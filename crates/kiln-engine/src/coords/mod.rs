//! Coordinate and geometry types shared by the draw list and the batcher.
//!
//! Canonical CPU space:
//! - Pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The batcher converts to NDC on the CPU using the frame's [`Viewport`].

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
