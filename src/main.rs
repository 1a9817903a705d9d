use std::process;
use std::sync::atomic::Ordering;
use std::time::Duration;

use argh::FromArgs;

use fluctus2serial::constants::common;
use fluctus2serial::{Emulator, SerialTransport};

/// Emulate a Fluctus device: replay a known-good telemetry packet on a serial
/// port every 100 ms.
#[derive(FromArgs)]
struct Args {
    /// serial device to write to
    #[argh(option, short = 'p', default = "common::SERIAL_PORT.to_string()")]
    port: String,

    /// baud rate
    #[argh(option, short = 'b', default = "common::BAUDRATE")]
    baud: u32,

    /// milliseconds between packets
    #[argh(option, default = "common::SEND_INTERVAL_MS")]
    interval_ms: u64,

    /// stop after this many packets instead of running forever
    #[argh(option, short = 'n')]
    count: Option<u64>,

    /// verbose mode
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() {
    let args: Args = argh::from_env();

    let mut transport = match SerialTransport::new(&args.port, args.baud) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to open serial port {}: {}", args.port, e);
            process::exit(1);
        }
    };

    if args.verbose {
        println!(
            "Emulating Fluctus on {} at {} baud, one packet every {} ms...",
            transport.port_name(),
            args.baud,
            args.interval_ms
        );
    }

    let emulator = Emulator::new(
        common::TEST_PACKET.as_bytes(),
        Duration::from_millis(args.interval_ms),
    )
    .verbose(args.verbose);

    let sent = emulator.sent_counter();
    ctrlc::set_handler(move || {
        println!("\nStopping: {} packets sent.", sent.load(Ordering::Relaxed));
        process::exit(0);
    })
    .expect("Error setting Ctrl+C handler");

    if let Err(e) = emulator.run(&mut transport, args.count) {
        eprintln!("Serial write error: {}", e);
        process::exit(1);
    }
}
