//! Stream adapter: transfers longer than the ring's capacity, chunked
//! transparently, including the case where concurrent threads move more
//! bytes than fit in the ring at once.

use dmxp_queue::{LockFreeQueue, Reader, Writer};
use std::thread;

fn queue_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("dmxp-queue-test-{name}-{}", std::process::id()))
}

#[test]
fn write_all_longer_than_capacity() {
    let path = queue_path("stream-long");
    let capacity = 16;
    let queue = LockFreeQueue::create(&path, capacity).unwrap();
    let producer = queue.producer();
    let consumer = queue.consumer();

    let payload: Vec<u8> = (0..500u32).map(|i| (i % 251) as u8).collect();
    let expected = payload.clone();

    let writer = thread::spawn(move || producer.write_all(&payload));
    let mut received = vec![0u8; expected.len()];
    consumer.read_exact(&mut received);
    writer.join().unwrap();

    assert_eq!(received, expected);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn chunk_size_never_exceeds_half_capacity() {
    // capacity/2 is the largest single push/pop the adapter issues; verify
    // indirectly by using a capacity too small to hold the whole transfer,
    // relying on `push`/`pop`'s own assert to catch a regression that
    // forwards an oversized chunk straight through.
    let path = queue_path("stream-chunking");
    let capacity = 10;
    let queue = LockFreeQueue::create(&path, capacity).unwrap();
    let producer = queue.producer();
    let consumer = queue.consumer();

    let payload = vec![42u8; 37];
    let expected = payload.clone();
    let writer = thread::spawn(move || producer.write_all(&payload));

    let mut received = vec![0u8; expected.len()];
    consumer.read_exact(&mut received);
    writer.join().unwrap();

    assert_eq!(received, expected);

    let _ = std::fs::remove_file(&path);
}
