//! Queue construction and lifecycle: create/attach, capacity round-trip,
//! and both backends exercised end to end within a single process.

use dmxp_queue::{BlockingQueue, LockFreeQueue, QueueBuilder};

fn queue_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("dmxp-queue-test-{name}-{}", std::process::id()))
}

#[test]
fn create_then_attach_lock_free() {
    let path = queue_path("create-attach-lf");
    let created = LockFreeQueue::create(&path, 256).unwrap();
    assert_eq!(created.capacity(), 256);

    let attached = LockFreeQueue::attach(&path).unwrap();
    assert_eq!(attached.capacity(), 256);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn create_then_attach_blocking() {
    let path = queue_path("create-attach-blocking");
    let created = BlockingQueue::create(&path, 256).unwrap();
    assert_eq!(created.capacity(), 256);

    let attached = BlockingQueue::attach(&path).unwrap();
    assert_eq!(attached.capacity(), 256);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn attach_without_create_fails() {
    let path = queue_path("never-created");
    let _ = std::fs::remove_file(&path);
    assert!(LockFreeQueue::attach(&path).is_err());
}

#[test]
fn builder_attach_or_create_creates_once() {
    let path = queue_path("builder");
    let _ = std::fs::remove_file(&path);

    let first = QueueBuilder::<dmxp_queue::LockFree>::new(&path)
        .with_capacity(128)
        .attach_or_create()
        .unwrap();
    assert_eq!(first.capacity(), 128);
    drop(first);

    // Second call attaches to the file created above; its capacity is
    // whatever the file was sized to, not the builder's request.
    let second = QueueBuilder::<dmxp_queue::LockFree>::new(&path)
        .with_capacity(9999)
        .attach_or_create()
        .unwrap();
    assert_eq!(second.capacity(), 128);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn blocking_backend_wakes_a_waiting_reader() {
    use std::thread;
    use std::time::Duration;

    let path = queue_path("blocking-wake");
    let queue = BlockingQueue::create(&path, 64).unwrap();
    let producer = queue.producer();
    let consumer = queue.consumer();

    let reader = thread::spawn(move || {
        let mut buf = [0u8; 4];
        consumer.pop(&mut buf);
        buf
    });

    thread::sleep(Duration::from_millis(50));
    producer.push(&[9, 8, 7, 6]);

    let buf = reader.join().unwrap();
    assert_eq!(buf, [9, 8, 7, 6]);

    let _ = std::fs::remove_file(&path);
}
