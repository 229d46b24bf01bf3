//! Lock-free backend: a bare atomic counter, busy-waited with cooperative
//! yielding. No syscall, no kernel sleep: a peer that never shows up
//! spins its waiter forever.

use super::Backend;
use crate::layout::LockFreeHeader;
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicI32, Ordering};

pub struct LockFree;

impl Backend for LockFree {
    type Header = LockFreeHeader;

    unsafe fn init_header(header_ptr: *mut Self::Header, capacity: i32) {
        std::ptr::write(
            header_ptr,
            LockFreeHeader {
                capacity,
                size: CachePadded::new(AtomicI32::new(0)),
            },
        );
    }

    fn wait_write(header: &Self::Header, n: usize) {
        let n = n as i32;
        while header.capacity - header.size.load(Ordering::Acquire) < n {
            std::thread::yield_now();
        }
    }

    fn wait_read(header: &Self::Header, n: usize) -> usize {
        let n = n as i32;
        loop {
            let observed = header.size.load(Ordering::Acquire);
            if observed >= n {
                return observed as usize;
            }
            std::thread::yield_now();
        }
    }

    // Release here and Acquire in the loads above form the happens-before
    // edge: the payload copy that precedes this call becomes visible to
    // whichever peer observes the new size, on weak-memory hardware and not
    // just x86.
    fn inc_size(header: &Self::Header, delta: i64) {
        header.size.fetch_add(delta as i32, Ordering::Release);
    }
}
