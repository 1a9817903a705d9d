use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Local;

use crate::error::Result;

/// Replays a fixed telemetry packet on a timer, standing in for Fluctus
/// hardware on the other end of a serial link.
///
/// The sink is any `io::Write` so the loop can be exercised against an
/// in-memory buffer as well as a real port.
pub struct Emulator {
    packet: Vec<u8>,
    interval: Duration,
    verbose: bool,
    sent: Arc<AtomicU64>,
}

impl Emulator {
    pub fn new(packet: impl Into<Vec<u8>>, interval: Duration) -> Self {
        Self {
            packet: packet.into(),
            interval,
            verbose: false,
            sent: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Shared view of the number of packets written so far, for use from a
    /// shutdown handler.
    pub fn sent_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.sent)
    }

    /// Runs the send loop: write the packet, print a progress line, sleep,
    /// repeat. `count` bounds the number of iterations; `None` runs until the
    /// process is killed or a write fails.
    ///
    /// Any write error is fatal and surfaces to the caller.
    pub fn run<W: Write>(&self, port: &mut W, count: Option<u64>) -> Result<()> {
        let mut i: u64 = 0;
        loop {
            if let Some(max) = count {
                if i >= max {
                    return Ok(());
                }
            }

            port.write_all(&self.packet)?;
            println!("Sent packet #{}", i);
            if self.verbose {
                let now = Local::now();
                println!(
                    "{} - wrote {} bytes",
                    now.format("%Y-%m-%d %H:%M:%S%.3f"),
                    self.packet.len()
                );
            }
            i += 1;
            self.sent.store(i, Ordering::Relaxed);

            thread::sleep(self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "port gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_packet_byte_for_byte() {
        let emulator = Emulator::new(&b"FBDEADBEEF\n"[..], Duration::from_millis(0));
        let mut sink = Vec::new();
        emulator.run(&mut sink, Some(3)).unwrap();

        assert_eq!(sink, b"FBDEADBEEF\n".repeat(3));
        assert_eq!(emulator.sent_counter().load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_zero_iterations_write_nothing() {
        let emulator = Emulator::new(&b"x"[..], Duration::from_millis(0));
        let mut sink = Vec::new();
        emulator.run(&mut sink, Some(0)).unwrap();
        assert!(sink.is_empty());
        assert_eq!(emulator.sent_counter().load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let emulator = Emulator::new(&b"x"[..], Duration::from_millis(0));
        let result = emulator.run(&mut FailingWriter, Some(5));
        assert!(result.is_err());
        assert_eq!(emulator.sent_counter().load(Ordering::Relaxed), 0);
    }
}
