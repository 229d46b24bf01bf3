//! Stream adaptation: chunk arbitrary-length reads/writes into pieces no
//! larger than `capacity / 2`, so a transfer longer than the ring can still
//! make progress instead of deadlocking against its own backlog.

use crate::consumer::Consumer;
use crate::producer::Producer;
use crate::sync::Backend;

/// A sink for byte streams longer than a queue's ring capacity.
pub trait Writer {
    /// Writes all of `buf`, chunking internally as needed. Blocks until
    /// every byte has been pushed.
    fn write_all(&self, buf: &[u8]);
}

/// A source for byte streams longer than a queue's ring capacity.
pub trait Reader {
    /// Fills `buf` completely, chunking internally as needed. Blocks until
    /// every byte has been popped.
    fn read_exact(&self, buf: &mut [u8]);
}

impl<B: Backend> Writer for Producer<B> {
    fn write_all(&self, buf: &[u8]) {
        let chunk = (self.capacity() / 2).max(1);
        let mut remaining = buf;
        while !remaining.is_empty() {
            let take = chunk.min(remaining.len());
            self.push(&remaining[..take]);
            remaining = &remaining[take..];
        }
    }
}

impl<B: Backend> Reader for Consumer<B> {
    fn read_exact(&self, buf: &mut [u8]) {
        let chunk = (self.capacity() / 2).max(1);
        let mut remaining = buf;
        while !remaining.is_empty() {
            let take = chunk.min(remaining.len());
            let (head, tail) = remaining.split_at_mut(take);
            self.pop(head);
            remaining = tail;
        }
    }
}
