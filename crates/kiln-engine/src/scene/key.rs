use core::cmp::Ordering;

use super::ZIndex;

/// Stable sort key for pooled draw commands.
///
/// Ordering rules:
/// 1) `z`: ascending (back-to-front)
/// 2) `slot`: ascending (request order for equal z)
///
/// Slots are handed out in request order within a frame, so comparing them
/// breaks z ties deterministically.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    /// Depth. Lower values are drawn first (further back).
    pub z: ZIndex,
    /// Pool slot index of the command.
    pub slot: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, slot: u32) -> Self {
        Self { z, slot }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.z.cmp(&other.z) {
            Ordering::Equal => self.slot.cmp(&other.slot),
            o => o,
        }
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
