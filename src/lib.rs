//! A single-producer/single-consumer byte-stream queue over a
//! memory-mapped file, for passing bytes between two processes without a
//! kernel round-trip per message.
//!
//! Pick a synchronization backend with the `B` type parameter on [`Queue`]:
//! [`LockFree`] busy-waits on an atomic counter, [`Blocking`] sleeps on a
//! process-shared mutex/condvar pair. Both share the same ring layout and
//! copy logic; only how a blocked endpoint waits differs.
//!
//! ```no_run
//! use dmxp_queue::LockFreeQueue;
//!
//! let queue = LockFreeQueue::create("/tmp/my-queue", 64 * 1024)?;
//! let producer = queue.producer();
//! producer.push(b"hello");
//! # Ok::<(), std::io::Error>(())
//! ```

mod layout;
mod producer;
mod consumer;
mod queue;
mod ring;
mod shared_memory;
mod stream;
pub mod sync;

pub use consumer::Consumer;
pub use producer::Producer;
pub use queue::{BlockingQueue, LockFreeQueue, Queue, QueueBuilder};
pub use stream::{Reader, Writer};
pub use sync::{Backend, Blocking, LockFree};
