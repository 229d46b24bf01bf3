//! Producer endpoint. Thin wrapper over `RingCore` that owns the
//! producer's local write cursor. Mirrors the split between a ring
//! engine and a per-endpoint struct that owns nothing but a cursor.

use crate::ring::RingCore;
use crate::shared_memory::Mapping;
use crate::sync::Backend;
use std::cell::Cell;
use std::sync::Arc;

/// Writes bytes into a queue's ring. One `Producer` per process: the
/// endpoint-local `pos` cursor is never shared.
pub struct Producer<B: Backend> {
    core: RingCore<B>,
    pos: Cell<usize>,
}

unsafe impl<B: Backend> Sync for Producer<B> {}

impl<B: Backend> Producer<B> {
    pub(crate) fn new(mapping: Arc<Mapping<B>>) -> Self {
        Self {
            core: RingCore::new(mapping),
            pos: Cell::new(0),
        }
    }

    /// Total ring capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Blocks until there is room, then copies `buf` into the ring.
    /// Panics if `buf.len() > capacity()`. See [`crate::Writer`] for
    /// buffers that may exceed it.
    pub fn push(&self, buf: &[u8]) {
        let mut pos = self.pos.get();
        self.core.push(&mut pos, buf);
        self.pos.set(pos);
    }
}
