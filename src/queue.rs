//! Top-level queue construction: generalizes the attach-if-present-else-
//! create, capacity-default builder pattern onto this crate's
//! single-channel, path-addressed queue.

use crate::consumer::Consumer;
use crate::producer::Producer;
use crate::shared_memory::Mapping;
use crate::sync::Backend;
use std::io;
use std::marker::PhantomData;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A shared-memory byte-stream queue backed by a file at a known path.
///
/// `B` selects the synchronization discipline ([`crate::LockFree`] or
/// [`crate::Blocking`]) and is resolved at compile time (see
/// [`crate::Backend`]).
pub struct Queue<B: Backend> {
    mapping: Arc<Mapping<B>>,
}

impl<B: Backend> Queue<B> {
    /// Create a new queue file at `path` with the given ring capacity in
    /// bytes. The peer must [`attach`](Self::attach) *after* this returns:
    /// this truncates the file.
    pub fn create<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<Self> {
        Ok(Self {
            mapping: Arc::new(Mapping::create(path.as_ref(), capacity)?),
        })
    }

    /// Attach to a queue file already initialized by a peer's
    /// [`create`](Self::create).
    pub fn attach<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self {
            mapping: Arc::new(Mapping::attach(path.as_ref())?),
        })
    }

    /// Attach via a descriptor inherited across a `fork`, rather than
    /// reopening the file by path.
    pub fn attach_fd(fd: RawFd) -> io::Result<Self> {
        Ok(Self {
            mapping: Arc::new(Mapping::attach_fd(fd)?),
        })
    }

    /// Ring capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.mapping.capacity()
    }

    /// Obtain the producer endpoint. Exactly one process should hold the
    /// producer role for the queue's lifetime. Nothing prevents calling
    /// this more than once, but doing so violates the single-producer
    /// contract.
    pub fn producer(&self) -> Producer<B> {
        Producer::new(self.mapping.clone())
    }

    /// Obtain the consumer endpoint (see [`producer`](Self::producer)).
    pub fn consumer(&self) -> Consumer<B> {
        Consumer::new(self.mapping.clone())
    }
}

/// Convenience builder for the common "attach if the file already exists,
/// otherwise create it" pattern used by a long-running producer that may or
/// may not be first to start.
pub struct QueueBuilder<B: Backend> {
    path: PathBuf,
    capacity: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> QueueBuilder<B> {
    const DEFAULT_CAPACITY: usize = 1024 * 1024;

    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            capacity: Self::DEFAULT_CAPACITY,
            _backend: PhantomData,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn create(self) -> io::Result<Queue<B>> {
        Queue::create(self.path, self.capacity)
    }

    pub fn attach(self) -> io::Result<Queue<B>> {
        Queue::attach(self.path)
    }

    /// Attach to an existing queue file, or create one if none exists yet.
    pub fn attach_or_create(self) -> io::Result<Queue<B>> {
        match Queue::<B>::attach(&self.path) {
            Ok(queue) => Ok(queue),
            Err(_) => Queue::<B>::create(&self.path, self.capacity),
        }
    }
}

/// A queue using the lock-free backend.
pub type LockFreeQueue = Queue<crate::LockFree>;
/// A queue using the blocking backend.
pub type BlockingQueue = Queue<crate::Blocking>;
