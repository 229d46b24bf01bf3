//! Pushes a stream of length-prefixed, hashed messages into a lock-free
//! queue. Pair with `consumer_demo`, pointed at the same path.
use dmxp_queue::{LockFreeQueue, Writer};
use sha2::{Digest, Sha256};
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <path> <message_count> [capacity]", args[0]);
        std::process::exit(1);
    }
    let path = &args[1];
    let message_count: usize = args[2].parse().expect("invalid message count");
    let capacity: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(1024 * 1024);

    println!("Producer: creating queue at {path} (capacity {capacity} bytes)");
    let queue = LockFreeQueue::create(path, capacity)?;
    let producer = queue.producer();

    let running = Arc::new(AtomicBool::new(true));
    let running_handler = Arc::clone(&running);
    ctrlc::set_handler(move || running_handler.store(false, Ordering::SeqCst))
        .expect("error setting Ctrl+C handler");

    println!("Producer: sending {message_count} messages...");
    let start = std::time::Instant::now();

    for i in 0..message_count {
        if !running.load(Ordering::SeqCst) {
            println!("Producer: interrupted, stopping at message {i}");
            break;
        }
        let mut hasher = Sha256::new();
        hasher.update(format!("message_{i}").as_bytes());
        let hash_hex = format!("{:x}", hasher.finalize());
        let payload = format!("{i}:{hash_hex}");

        let len = payload.len() as u32;
        producer.write_all(&len.to_le_bytes());
        producer.write_all(payload.as_bytes());

        if (i + 1) % 1000 == 0 {
            println!("  sent {} messages", i + 1);
        }
    }

    let elapsed = start.elapsed();
    println!(
        "Producer: done in {:.2?} ({:.0} msg/s)",
        elapsed,
        message_count as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}
