//! Shared region layout: the header prefix that lives at the
//! start of the mapped file, followed immediately by the ring's data bytes.
//!
//! Every header begins with `capacity` so the field sits at the same offset
//! regardless of which backend created the file. The two backends otherwise
//! diverge completely in what follows `capacity`: a bare atomic counter for
//! the lock-free backend, or a counter guarded by a process-shared mutex and
//! condition variable for the blocking one.

use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::sync::atomic::AtomicI32;

/// Header for the lock-free backend.
///
/// `size` is a plain atomic; all synchronization is carried by the ordering
/// of the loads/stores performed on it (see `sync::lock_free`). It is the
/// only field both endpoints touch after creation, so it gets its own cache
/// line rather than sharing one with the read-only `capacity`.
#[repr(C)]
pub struct LockFreeHeader {
    pub(crate) capacity: i32,
    pub(crate) size: CachePadded<AtomicI32>,
}

/// Header for the blocking backend.
///
/// `size` is a plain integer; every access to it happens with `mutex` held,
/// so it does not need to be atomic itself. `mutex` and `cond` are
/// initialized with the process-shared attribute so they retain meaning once
/// mapped into a peer's address space.
#[repr(C)]
pub struct BlockingHeader {
    pub(crate) capacity: i32,
    pub(crate) size: UnsafeCell<i32>,
    pub(crate) mutex: UnsafeCell<libc::pthread_mutex_t>,
    pub(crate) cond: UnsafeCell<libc::pthread_cond_t>,
}

unsafe impl Sync for BlockingHeader {}
