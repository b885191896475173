//! Per-kind payloads and the `DrawList` mutators that install them.
//!
//! Each `set_*` switches the command's kind and overwrites its payload; the
//! last call wins.

pub(crate) mod mesh;
pub(crate) mod polyline;
pub(crate) mod rect;
pub(crate) mod texture;
