use core::cmp::Ordering;

/// Depth key for draw commands (painter's algorithm).
///
/// Higher values are drawn later, on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ZIndex(pub u64);

impl ZIndex {
    #[inline]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    /// Packs a GUI frame/session index into the high 32 bits and a tree-depth
    /// offset into the low 32 bits.
    ///
    /// Deeper nodes of the same pass sort above their parents, and every GUI
    /// draw of session `n` sorts above world draws whose z is below `n << 32`.
    #[inline]
    pub const fn gui(session: u32, depth: u32) -> Self {
        Self(((session as u64) << 32) | depth as u64)
    }

    /// Returns this index moved `delta` layers up, saturating at `u64::MAX`.
    #[inline]
    pub const fn offset(self, delta: u64) -> Self {
        Self(self.0.saturating_add(delta))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ZIndex {
    #[inline]
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl Ord for ZIndex {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for ZIndex {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
