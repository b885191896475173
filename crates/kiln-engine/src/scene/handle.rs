use std::fmt;

/// Reference to a reserved draw-list slot.
///
/// Handles are plain indices, so pool growth never invalidates them. They are
/// tagged with the frame epoch they were issued in; using one after
/// [`DrawList::clear`](super::DrawList::clear) panics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DrawHandle {
    pub(crate) index: u32,
    pub(crate) epoch: u32,
}

impl DrawHandle {
    #[inline]
    pub(crate) const fn new(index: u32, epoch: u32) -> Self {
        Self { index, epoch }
    }

    /// Pool slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Frame epoch this handle was issued in.
    #[inline]
    pub const fn epoch(self) -> u32 {
        self.epoch
    }
}

/// Out-of-range draw-list access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    pub index: usize,
    pub count: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draw list index {} out of range (count {})", self.index, self.count)
    }
}

impl std::error::Error for IndexError {}
