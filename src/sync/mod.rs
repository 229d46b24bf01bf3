//! Synchronization backends.
//!
//! A backend is a capability set (init/wait_write/wait_read/inc_size)
//! implemented once for the lock-free header and once for the blocking one.
//! `Queue<B>` is generic over `B: Backend` and resolved statically: no
//! vtable, no runtime backend switch.

mod blocking;
mod lock_free;

pub use blocking::Blocking;
pub use lock_free::LockFree;

/// A synchronization discipline for the ring's `size` counter.
///
/// Implementations operate on `Header`, the backend-specific prefix of the
/// shared region. All methods take `&Header` because the header lives in
/// memory shared with another process; `&mut` would be a lie.
pub trait Backend {
    type Header;

    /// Initialize a freshly mapped, zero-filled header. Called exactly once,
    /// by the process that creates the queue file.
    ///
    /// # Safety
    /// `header_ptr` must point at `size_of::<Self::Header>()` writable bytes
    /// that no other process has started reading yet.
    unsafe fn init_header(header_ptr: *mut Self::Header, capacity: i32);

    /// Busy-wait or sleep until at least `n` bytes of free space exist.
    fn wait_write(header: &Self::Header, n: usize);

    /// Busy-wait or sleep until at least `n` bytes are available; returns the
    /// occupancy observed at the moment the wait succeeded.
    fn wait_read(header: &Self::Header, n: usize) -> usize;

    /// Adjust `size` by `delta` (negative for a consumer's pop).
    fn inc_size(header: &Self::Header, delta: i64);
}
