use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::coords::{Rect, Vec2};

use super::{DrawCmd, DrawHandle, IndexError, SortKey, ZIndex};

/// Slots pre-allocated by [`DrawList::new`].
pub const INITIAL_CAPACITY: usize = 256;

/// Guard value written into every slot at initialization.
///
/// Checked on every reservation and every handle access; a mismatch means the
/// pool's bookkeeping has been corrupted and the frame cannot be trusted.
pub const SLOT_MAGIC: u32 = 0xD2A3_1157;

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct DrawListConfig {
    /// Slots allocated up front. Clamped to at least 1.
    pub initial_capacity: usize,
    /// Maximum points accepted by [`DrawList::set_polyline`].
    pub max_polyline_points: usize,
}

impl Default for DrawListConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            max_polyline_points: 256,
        }
    }
}

struct Slot {
    magic: u32,
    cmd: Mutex<DrawCmd>,
}

impl Slot {
    fn new() -> Self {
        Self { magic: SLOT_MAGIC, cmd: Mutex::new(DrawCmd::default()) }
    }
}

/// Frame-reusable pool of draw commands.
///
/// Producers call [`request_object`](Self::request_object) (from any thread),
/// then fill the returned handle with the `set_*` mutators. The batcher sorts
/// and reads the list once producers are done, and the frame ends with
/// [`clear`](Self::clear), which keeps every slot for the next frame.
///
/// Concurrency:
/// - reserving a slot index is a single atomic increment
/// - the slot array is behind an `RwLock`; reservations within capacity share
///   the read side, growth takes the write side
/// - each slot has its own mutex, so producers filling different slots never
///   contend
pub struct DrawList {
    slots: RwLock<Vec<Slot>>,
    /// Reserved slot count. May transiently run past `slots.len()` while a
    /// growth is pending; readers clamp it.
    count: AtomicUsize,
    epoch: AtomicU32,

    /// Paint order from the last [`sort`](Self::sort); reused across frames.
    order: RwLock<Vec<SortKey>>,
    sorted: AtomicBool,

    config: DrawListConfig,
}

impl DrawList {
    /// Creates a list with [`INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_config(DrawListConfig::default())
    }

    pub fn with_config(config: DrawListConfig) -> Self {
        let capacity = config.initial_capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::new);

        Self {
            slots: RwLock::new(slots),
            count: AtomicUsize::new(0),
            epoch: AtomicU32::new(0),
            order: RwLock::new(Vec::with_capacity(capacity)),
            sorted: AtomicBool::new(false),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &DrawListConfig {
        &self.config
    }

    /// Ends the frame: every handle issued so far becomes invalid and the slots
    /// are recycled by later requests. Never allocates or frees.
    pub fn clear(&mut self) {
        *self.count.get_mut() = 0;
        let epoch = self.epoch.get_mut();
        *epoch = epoch.wrapping_add(1);
        *self.sorted.get_mut() = false;
        self.order.get_mut().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Reserves the next free slot, growing the pool (×2) when exhausted.
    ///
    /// The slot is reset to a transparent filled rect at the origin with a
    /// centered pivot, z-index 0 and no scissor.
    pub fn request_object(&self) -> DrawHandle {
        let index = self.count.fetch_add(1, Ordering::AcqRel);
        self.sorted.store(false, Ordering::Release);

        let index32 = u32::try_from(index)
            .unwrap_or_else(|_| panic!("draw list exhausted the u32 handle space"));
        let handle = DrawHandle::new(index32, self.epoch.load(Ordering::Acquire));

        {
            let slots = self.read_slots();
            if index < slots.len() {
                Self::reset_slot(&slots, index);
                return handle;
            }
        }

        self.grow_to(index + 1);
        let slots = self.read_slots();
        Self::reset_slot(&slots, index);
        handle
    }

    fn reset_slot(slots: &[Slot], index: usize) {
        let slot = &slots[index];
        check_magic(slot, index);
        lock(&slot.cmd).reset();
    }

    fn grow_to(&self, required: usize) {
        let mut slots = self.write_slots();
        let old = slots.len();
        if required <= old {
            // Another producer grew the pool while we waited for the lock.
            return;
        }

        let mut new_cap = old.max(1);
        while new_cap < required {
            new_cap = new_cap
                .checked_mul(2)
                .unwrap_or_else(|| panic!("draw list capacity overflow growing past {old}"));
        }

        slots.reserve_exact(new_cap - old);
        slots.resize_with(new_cap, Slot::new);
        log::debug!("draw list grew from {old} to {new_cap} slots");
    }

    /// Slots in use this frame.
    pub fn count(&self) -> usize {
        let slots = self.read_slots();
        self.count.load(Ordering::Acquire).min(slots.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Allocated slots. Only ever grows.
    pub fn capacity(&self) -> usize {
        self.read_slots().len()
    }

    /// `true` if no object was requested or re-layered since the last [`sort`](Self::sort).
    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted.load(Ordering::Acquire)
    }

    /// Orders in-use commands by ascending z-index.
    ///
    /// Stable: equal z-indices keep request order. Slots are not moved, so
    /// handles stay valid; the order is read back through [`get`](Self::get)
    /// and [`visit_in_paint_order`](Self::visit_in_paint_order).
    pub fn sort(&self) {
        let slots = self.read_slots();
        let count = self.count.load(Ordering::Acquire).min(slots.len());

        let mut order = self.order.write().unwrap_or_else(PoisonError::into_inner);
        order.clear();
        order.extend(slots[..count].iter().enumerate().map(|(i, slot)| {
            check_magic(slot, i);
            // `count` is bounded by the u32 handle space enforced in request_object.
            SortKey::new(lock(&slot.cmd).z, i as u32)
        }));

        // Keys are unique (slot index), so an unstable sort yields a stable order.
        order.sort_unstable();
        self.sorted.store(true, Ordering::Release);
    }

    /// Returns the handle at position `index`: paint order if the list is
    /// sorted, request order otherwise.
    ///
    /// # Panics
    /// Panics if `index >= count()`.
    pub fn get(&self, index: usize) -> DrawHandle {
        self.try_get(index).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_get(&self, index: usize) -> Result<DrawHandle, IndexError> {
        let count = self.count();
        if index >= count {
            return Err(IndexError { index, count });
        }

        let epoch = self.epoch.load(Ordering::Acquire);
        if self.is_sorted() {
            let order = self.order.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(key) = order.get(index) {
                return Ok(DrawHandle::new(key.slot, epoch));
            }
        }
        Ok(DrawHandle::new(index as u32, epoch))
    }

    /// Calls `f` for every in-use command in paint order, sorting first if needed.
    pub fn visit_in_paint_order(&self, mut f: impl FnMut(DrawHandle, &DrawCmd)) {
        if !self.is_sorted() {
            self.sort();
        }

        let slots = self.read_slots();
        let order = self.order.read().unwrap_or_else(PoisonError::into_inner);
        let epoch = self.epoch.load(Ordering::Acquire);

        for key in order.iter() {
            let index = key.slot as usize;
            let slot = &slots[index];
            check_magic(slot, index);
            f(DrawHandle::new(key.slot, epoch), &lock(&slot.cmd));
        }
    }

    // ── handle access ─────────────────────────────────────────────────────

    /// Runs `f` with shared access to the command behind `handle`.
    ///
    /// # Panics
    /// Panics if `handle` is stale (issued before the last [`clear`](Self::clear))
    /// or its slot fails the corruption check.
    pub fn with<R>(&self, handle: DrawHandle, f: impl FnOnce(&DrawCmd) -> R) -> R {
        let slots = self.read_slots();
        let slot = self.checked_slot(&slots, handle);
        f(&lock(&slot.cmd))
    }

    /// Runs `f` with exclusive access to the command behind `handle`.
    ///
    /// # Panics
    /// Same conditions as [`with`](Self::with).
    pub fn with_mut<R>(&self, handle: DrawHandle, f: impl FnOnce(&mut DrawCmd) -> R) -> R {
        let slots = self.read_slots();
        let slot = self.checked_slot(&slots, handle);
        f(&mut lock(&slot.cmd))
    }

    /// Copies out the command behind `handle`.
    pub fn command(&self, handle: DrawHandle) -> DrawCmd {
        self.with(handle, DrawCmd::clone)
    }

    fn checked_slot<'a>(&self, slots: &'a [Slot], handle: DrawHandle) -> &'a Slot {
        let epoch = self.epoch.load(Ordering::Acquire);
        assert!(
            handle.epoch == epoch,
            "stale draw handle: slot {} issued in epoch {}, list is in epoch {}",
            handle.index,
            handle.epoch,
            epoch
        );

        let index = handle.index();
        let count = self.count.load(Ordering::Acquire).min(slots.len());
        assert!(index < count, "{}", IndexError { index, count });

        let slot = &slots[index];
        check_magic(slot, index);
        slot
    }

    // ── common mutators ───────────────────────────────────────────────────

    /// Sets position and size in pixels. Negative extents are normalized.
    ///
    /// Polylines and meshes only use the position; their extent comes from
    /// their points.
    pub fn set_bounds(&self, handle: DrawHandle, x: f32, y: f32, w: f32, h: f32) {
        self.with_mut(handle, |cmd| cmd.bounds = Rect::new(x, y, w, h).normalized());
    }

    pub fn set_z_index(&self, handle: DrawHandle, z: impl Into<ZIndex>) {
        let z = z.into();
        self.with_mut(handle, |cmd| cmd.z = z);
        self.sorted.store(false, Ordering::Release);
    }

    /// Sets rotation in radians about the pivot.
    pub fn set_rotation(&self, handle: DrawHandle, radians: f32) {
        assert!(radians.is_finite(), "rotation must be finite, got {radians}");
        self.with_mut(handle, |cmd| cmd.rotation = radians);
    }

    /// Sets the normalized pivot, clamped to `[0, 1]²`.
    pub fn set_pivot(&self, handle: DrawHandle, nx: f32, ny: f32) {
        assert!(!nx.is_nan() && !ny.is_nan(), "pivot must not be NaN");
        self.with_mut(handle, |cmd| {
            cmd.pivot = Vec2::new(nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0));
        });
    }

    /// Sets the clip rect the backend applies to this command.
    pub fn set_scissor(&self, handle: DrawHandle, x: f32, y: f32, w: f32, h: f32) {
        let rect = Rect::new(x, y, w, h).normalized();
        assert!(rect.is_finite(), "scissor must be finite, got {rect:?}");
        self.with_mut(handle, |cmd| cmd.scissor = Some(rect));
    }

    pub fn clear_scissor(&self, handle: DrawHandle) {
        self.with_mut(handle, |cmd| cmd.scissor = None);
    }

    /// Axis-aligned bounds after rotation about the pivot.
    pub fn get_rotated_aabb(&self, handle: DrawHandle) -> Rect {
        self.with(handle, DrawCmd::rotated_aabb)
    }

    // ── locking ───────────────────────────────────────────────────────────

    fn read_slots(&self) -> RwLockReadGuard<'_, Vec<Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slots(&self) -> RwLockWriteGuard<'_, Vec<Slot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Overwrites a slot's guard tag, standing in for a stray write.
    #[cfg(test)]
    fn overwrite_tag(&self, index: usize, tag: u32) {
        self.write_slots()[index].magic = tag;
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DrawList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawList")
            .field("count", &self.count())
            .field("capacity", &self.capacity())
            .field("epoch", &self.epoch.load(Ordering::Relaxed))
            .field("sorted", &self.is_sorted())
            .finish()
    }
}

/// A poisoned slot only means another producer panicked mid-write; the
/// command is plain data and is overwritten on the next request.
fn lock(cmd: &Mutex<DrawCmd>) -> MutexGuard<'_, DrawCmd> {
    cmd.lock().unwrap_or_else(PoisonError::into_inner)
}

fn check_magic(slot: &Slot, index: usize) {
    if slot.magic != SLOT_MAGIC {
        log::error!(
            "draw list slot {index} corrupted: tag {:#010x}, expected {SLOT_MAGIC:#010x}",
            slot.magic
        );
        panic!("draw list slot {index} corrupted (tag {:#010x})", slot.magic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::{DrawKind, MeshVertex, UvRect};

    fn small(capacity: usize) -> DrawList {
        DrawList::with_config(DrawListConfig { initial_capacity: capacity, ..Default::default() })
    }

    // ── pool ──────────────────────────────────────────────────────────────

    #[test]
    fn new_list_preallocates() {
        let list = DrawList::new();
        assert_eq!(list.capacity(), INITIAL_CAPACITY);
        assert_eq!(list.count(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn growth_doubles_and_preserves_content() {
        let list = small(4);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let h = list.request_object();
                list.set_bounds(h, i as f32, 0.0, 10.0, 10.0);
                list.set_z_index(h, i as u64 * 10);
                h
            })
            .collect();

        let extra = list.request_object();
        assert_eq!(list.capacity(), 8);
        assert_eq!(list.count(), 5);
        assert_eq!(extra.index(), 4);

        for (i, h) in handles.into_iter().enumerate() {
            let cmd = list.command(h);
            assert_eq!(cmd.position(), Vec2::new(i as f32, 0.0));
            assert_eq!(cmd.z_index(), ZIndex::new(i as u64 * 10));
        }
    }

    #[test]
    fn clear_resets_count_not_capacity() {
        let mut list = small(2);
        for _ in 0..5 {
            list.request_object();
        }
        assert_eq!(list.capacity(), 8);

        list.clear();
        assert_eq!(list.count(), 0);
        assert_eq!(list.capacity(), 8);

        for _ in 0..8 {
            list.request_object();
        }
        assert_eq!(list.capacity(), 8, "reuses existing slots before growing");
    }

    #[test]
    fn reservation_resets_previous_frame_contents() {
        let mut list = small(1);
        let h = list.request_object();
        list.set_rect_color(h, Color::WHITE, false);
        list.set_rotation(h, 1.0);
        list.set_scissor(h, 0.0, 0.0, 5.0, 5.0);
        list.clear();

        let h = list.request_object();
        let cmd = list.command(h);
        assert_eq!(cmd, DrawCmd::default());
    }

    #[test]
    #[should_panic(expected = "stale draw handle")]
    fn handle_is_invalid_after_clear() {
        let mut list = small(4);
        let h = list.request_object();
        list.clear();
        list.request_object();
        list.set_rotation(h, 0.5);
    }

    #[test]
    #[should_panic(expected = "corrupted")]
    fn stomped_slot_tag_panics_on_access() {
        let list = small(4);
        let h = list.request_object();
        list.overwrite_tag(h.index(), 0xDEAD_BEEF);
        list.set_rotation(h, 0.5);
    }

    #[test]
    #[should_panic(expected = "corrupted")]
    fn stomped_slot_tag_panics_on_reservation() {
        let list = small(4);
        list.overwrite_tag(0, 0);
        list.request_object();
    }

    #[test]
    fn payload_buffers_survive_clear() {
        let mut list = small(1);
        let long_id = "t".repeat(200);
        let points: Vec<_> = (0..100).map(|i| Vec2::new(i as f32, 0.0)).collect();

        let h = list.request_object();
        list.set_texture(h, &long_id, UvRect::FULL);
        list.set_polyline(h, &points, Color::WHITE, Color::BLACK, 1.0);
        list.clear();

        let h = list.request_object();
        list.set_texture(h, "a", UvRect::FULL);
        list.with(h, |cmd| {
            assert_eq!(cmd.texture().texture_id, "a");
            assert!(cmd.texture().texture_id.capacity() >= 200);
        });

        list.set_polyline(h, &points[..3], Color::WHITE, Color::BLACK, 1.0);
        list.with(h, |cmd| {
            assert_eq!(cmd.polyline().points.len(), 3);
            assert!(cmd.polyline().points.capacity() >= 100);
        });
    }

    #[test]
    fn mesh_buffers_survive_clear() {
        let mut list = small(1);
        let vertex = MeshVertex::new(Vec2::new(0.0, 0.0), [0.0, 0.0], Color::WHITE);
        let vertices = vec![vertex; 64];
        let indices: Vec<u32> = (0..63).collect();

        let h = list.request_object();
        list.set_mesh(h, &vertices, &indices, Some("atlas"));
        list.clear();

        let h = list.request_object();
        list.set_mesh(h, &vertices[..3], &indices[..3], None);
        list.with(h, |cmd| {
            let mesh = cmd.mesh();
            assert_eq!(mesh.indices, [0, 1, 2]);
            assert!(mesh.vertices.capacity() >= 64);
            assert!(mesh.indices.capacity() >= 63);
            assert_eq!(mesh.texture_id, None);
        });
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[test]
    fn try_get_out_of_range_is_index_error() {
        let list = small(4);
        list.request_object();
        assert_eq!(list.try_get(1), Err(IndexError { index: 1, count: 1 }));
        assert!(list.try_get(0).is_ok());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        let list = small(4);
        list.get(0);
    }

    #[test]
    fn pivot_is_clamped() {
        let list = small(1);
        let h = list.request_object();
        list.set_pivot(h, -1.0, 2.5);
        assert_eq!(list.command(h).pivot(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn scissor_set_and_cleared() {
        let list = small(1);
        let h = list.request_object();
        list.set_scissor(h, 10.0, 10.0, -5.0, 20.0);
        assert_eq!(list.command(h).scissor(), Some(Rect::new(5.0, 10.0, 5.0, 20.0)));
        list.clear_scissor(h);
        assert_eq!(list.command(h).scissor(), None);
    }

    #[test]
    fn rotated_aabb_fast_path_returns_bounds() {
        let list = small(1);
        let h = list.request_object();
        list.set_bounds(h, 10.0, 20.0, 30.0, 40.0);
        list.set_rotation(h, 5e-7);
        assert_eq!(list.get_rotated_aabb(h), Rect::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn rotated_aabb_quarter_turn_about_corner() {
        let list = small(1);
        let h = list.request_object();
        list.set_bounds(h, 0.0, 0.0, 40.0, 20.0);
        list.set_pivot(h, 0.0, 0.0);
        list.set_rotation(h, core::f32::consts::FRAC_PI_2);
        let b = list.get_rotated_aabb(h);
        assert!((b.origin.x + 20.0).abs() < 1e-3, "{b:?}");
        assert!(b.origin.y.abs() < 1e-3, "{b:?}");
        assert!((b.size.x - 20.0).abs() < 1e-3 && (b.size.y - 40.0).abs() < 1e-3, "{b:?}");
    }

    // ── sort ──────────────────────────────────────────────────────────────

    #[test]
    fn sort_orders_by_z_and_keeps_ties_in_request_order() {
        let list = small(8);
        let zs = [5u64, 1, 3, 1, 5, 0];
        let handles: Vec<_> = zs
            .iter()
            .map(|&z| {
                let h = list.request_object();
                list.set_z_index(h, z);
                h
            })
            .collect();

        assert!(!list.is_sorted());
        list.sort();
        assert!(list.is_sorted());

        let order: Vec<_> = (0..list.count()).map(|i| list.get(i)).collect();
        let expected = [handles[5], handles[1], handles[3], handles[2], handles[0], handles[4]];
        assert_eq!(order, expected);

        for pair in order.windows(2) {
            let a = list.command(pair[0]).z_index();
            let b = list.command(pair[1]).z_index();
            assert!(a <= b);
        }
    }

    #[test]
    fn unsorted_get_is_request_order_and_relayering_unsorts() {
        let list = small(4);
        let a = list.request_object();
        let b = list.request_object();
        list.set_z_index(a, 9u64);
        assert_eq!(list.get(0), a);

        list.sort();
        assert_eq!(list.get(0), b);

        list.set_z_index(b, 10u64);
        assert!(!list.is_sorted());
    }

    #[test]
    fn visit_sorts_lazily() {
        let list = small(4);
        for z in [3u64, 2, 1] {
            let h = list.request_object();
            list.set_z_index(h, z);
            list.set_rect_color(h, Color::WHITE, true);
        }

        let mut seen = Vec::new();
        list.visit_in_paint_order(|_, cmd| {
            assert_eq!(cmd.kind(), DrawKind::Rect);
            seen.push(cmd.z_index().get());
        });
        assert_eq!(seen, [1, 2, 3]);
    }

    // ── concurrency ───────────────────────────────────────────────────────

    #[test]
    fn concurrent_requests_get_unique_slots() {
        let list = small(4);
        let per_thread = 200;

        let mut all: Vec<DrawHandle> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..8u64)
                .map(|t| {
                    let list = &list;
                    s.spawn(move || {
                        (0..per_thread)
                            .map(|i| {
                                let h = list.request_object();
                                list.set_z_index(h, t * 1_000 + i);
                                h
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            workers.into_iter().flat_map(|w| w.join().unwrap()).collect()
        });

        assert_eq!(list.count(), 8 * per_thread as usize);
        assert!(list.capacity() >= list.count());
        assert!(list.capacity().is_power_of_two());

        all.sort_by_key(|h| h.index());
        all.dedup();
        assert_eq!(all.len(), 8 * per_thread as usize);
    }
}
