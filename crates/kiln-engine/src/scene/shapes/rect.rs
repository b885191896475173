use crate::paint::Color;
use crate::scene::{DrawHandle, DrawList, Payload};

/// Solid or outlined rectangle payload. Size comes from the command bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub color: Color,
    /// `false` draws only a border of the batcher's outline thickness.
    pub filled: bool,
}

impl RectCmd {
    #[inline]
    pub fn new(color: Color, filled: bool) -> Self {
        Self { color, filled }
    }
}

impl DrawList {
    /// Turns the command into a rect with the given color and fill mode.
    pub fn set_rect_color(&self, handle: DrawHandle, color: Color, filled: bool) {
        self.with_mut(handle, |cmd| cmd.payload = Payload::Rect(RectCmd::new(color, filled)));
    }
}
