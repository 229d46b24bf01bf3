//! Cross-process integration: a real producer process and a real consumer
//! process, each attaching to the same queue file independently.

use serial_test::serial;
use std::io;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

fn queue_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("dmxp-queue-cross-{name}-{}", std::process::id()))
}

#[test]
#[serial(queue_file)]
fn producer_and_consumer_processes_agree() -> io::Result<()> {
    let path = queue_path("lockfree");
    let _ = std::fs::remove_file(&path);
    const MESSAGE_COUNT: usize = 200;

    let producer = Command::new(env!("CARGO_BIN_EXE_producer_demo"))
        .arg(&path)
        .arg(MESSAGE_COUNT.to_string())
        .arg("65536")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Give the producer time to create the queue file before the consumer
    // tries to attach to it.
    thread::sleep(Duration::from_millis(300));

    let consumer = Command::new(env!("CARGO_BIN_EXE_consumer_demo"))
        .arg(&path)
        .arg(MESSAGE_COUNT.to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let consumer_output = consumer.wait_with_output()?;
    let producer_output = producer.wait_with_output()?;

    if !producer_output.status.success() {
        eprintln!(
            "producer stderr: {}",
            String::from_utf8_lossy(&producer_output.stderr)
        );
        panic!("producer process failed");
    }
    if !consumer_output.status.success() {
        eprintln!(
            "consumer stderr: {}",
            String::from_utf8_lossy(&consumer_output.stderr)
        );
        panic!("consumer process failed");
    }

    let consumer_stdout = String::from_utf8_lossy(&consumer_output.stdout);
    assert!(
        consumer_stdout.contains(&format!("received {MESSAGE_COUNT} messages")),
        "consumer did not report receiving all messages:\n{consumer_stdout}"
    );

    let _ = std::fs::remove_file(&path);
    Ok(())
}
