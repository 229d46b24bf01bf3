//! Pops length-prefixed messages pushed by `producer_demo` from a lock-free
//! queue at the same path.
use dmxp_queue::{LockFreeQueue, Reader};
use std::env;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <path> <expected_messages>", args[0]);
        std::process::exit(1);
    }
    let path = &args[1];
    let expected: usize = args[2].parse().expect("invalid expected message count");

    println!("Consumer: attaching to {path}");
    let queue = LockFreeQueue::attach(path)?;
    let consumer = queue.consumer();

    let start = std::time::Instant::now();
    let mut received = 0;
    let mut len_buf = [0u8; 4];

    while received < expected {
        consumer.read_exact(&mut len_buf);
        let len = u32::from_le_bytes(len_buf) as usize;
        let mut payload = vec![0u8; len];
        consumer.read_exact(&mut payload);

        if let Ok(message) = String::from_utf8(payload) {
            if received % 1000 == 0 {
                println!("  {received}: {message}");
            }
        }
        received += 1;
    }

    let elapsed = start.elapsed();
    println!(
        "Consumer: received {received} messages in {:.2?} ({:.0} msg/s)",
        elapsed,
        received as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}
