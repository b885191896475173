//! Kiln engine crate.
//!
//! This crate owns the per-frame 2D draw pipeline:
//! - `scene`: a thread-safe, frame-reusable pool of draw commands
//! - `render`: the depth-sorted batcher that turns the pool into NDC vertex
//!   buffers, one per backend draw call

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
