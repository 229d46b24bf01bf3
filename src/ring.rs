//! Ring engine: the two-segment wrap-around copy shared by the producer and
//! consumer halves.

use crate::shared_memory::Mapping;
use crate::sync::Backend;
use std::ptr;
use std::sync::Arc;

/// The shared half of push/pop: wait on the backend, then copy across the
/// wrap point if necessary. `pos` is the caller's endpoint-local cursor
/// (never shared, never compared against the other endpoint's).
pub(crate) struct RingCore<B: Backend> {
    mapping: Arc<Mapping<B>>,
}

impl<B: Backend> RingCore<B> {
    pub(crate) fn new(mapping: Arc<Mapping<B>>) -> Self {
        Self { mapping }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.mapping.capacity()
    }

    /// Producer half. Panics if `buf.len() > capacity`: that is a
    /// precondition violation treated as a contract breach, not a
    /// recoverable error. Callers with longer buffers go through the
    /// stream adapter instead.
    pub(crate) fn push(&self, pos: &mut usize, buf: &[u8]) {
        let n = buf.len();
        let capacity = self.capacity();
        assert!(
            n <= capacity,
            "push of {n} bytes exceeds ring capacity {capacity}; use the stream adapter instead"
        );
        if n == 0 {
            return;
        }

        B::wait_write(self.mapping.header(), n);

        let data = self.mapping.data_ptr();
        let first = n.min(capacity - *pos);
        unsafe {
            ptr::copy_nonoverlapping(buf.as_ptr(), data.add(*pos), first);
            if n > first {
                ptr::copy_nonoverlapping(buf.as_ptr().add(first), data, n - first);
            }
        }
        *pos = (*pos + n) % capacity;
        B::inc_size(self.mapping.header(), n as i64);
    }

    /// Consumer's exact pop: wait for `buf.len()` bytes, then copy them all
    /// out.
    pub(crate) fn pop_exact(&self, pos: &mut usize, buf: &mut [u8]) {
        let n = buf.len();
        let capacity = self.capacity();
        assert!(
            n <= capacity,
            "pop of {n} bytes exceeds ring capacity {capacity}; use the stream adapter instead"
        );
        if n == 0 {
            return;
        }

        B::wait_read(self.mapping.header(), n);
        self.copy_out_and_advance(pos, buf, n);
    }

    /// Consumer's opportunistic pop: wait for at least one byte, then take
    /// whatever is available up to `buf.len()`.
    pub(crate) fn pop_any(&self, pos: &mut usize, buf: &mut [u8]) -> usize {
        assert!(!buf.is_empty(), "pop_any requires a non-empty buffer");
        let observed = B::wait_read(self.mapping.header(), 1);
        let got = observed.min(buf.len());
        self.copy_out_and_advance(pos, &mut buf[..got], got);
        got
    }

    fn copy_out_and_advance(&self, pos: &mut usize, buf: &mut [u8], n: usize) {
        let capacity = self.capacity();
        let data = self.mapping.data_ptr();
        let first = n.min(capacity - *pos);
        unsafe {
            ptr::copy_nonoverlapping(data.add(*pos), buf.as_mut_ptr(), first);
            if n > first {
                ptr::copy_nonoverlapping(data, buf.as_mut_ptr().add(first), n - first);
            }
        }
        *pos = (*pos + n) % capacity;
        B::inc_size(self.mapping.header(), -(n as i64));
    }
}
