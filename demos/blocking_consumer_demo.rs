//! Same as `consumer_demo`, but attaches via the blocking backend. The
//! consumer thread sleeps on the queue's condvar instead of spinning while
//! it waits for the producer.
use dmxp_queue::{BlockingQueue, Reader};
use std::env;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <path>", args[0]);
        std::process::exit(1);
    }
    let path = &args[1];

    println!("Blocking consumer: attaching to {path}");
    let queue = BlockingQueue::attach(path)?;
    let consumer = queue.consumer();

    let mut len_buf = [0u8; 4];
    loop {
        consumer.read_exact(&mut len_buf);
        let len = u32::from_le_bytes(len_buf) as usize;
        let mut payload = vec![0u8; len];
        consumer.read_exact(&mut payload);

        match String::from_utf8(payload) {
            Ok(message) => println!("received: {message}"),
            Err(_) => println!("received {len} non-utf8 bytes"),
        }
    }
}
