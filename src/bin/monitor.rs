use std::process;
use std::thread;
use std::time::Duration;

use argh::FromArgs;
use chrono::Local;

use std::str::FromStr;

use fluctus2serial::constants::common;
use fluctus2serial::{Band, FluctusError, SerialTransport, StartCommand};

/// Read Fluctus telemetry from a serial port and print the decoded frames.
/// The opposite end of the link the emulator drives.
#[derive(FromArgs)]
struct Args {
    /// serial device to read from
    #[argh(option, short = 'p', default = "common::SERIAL_PORT.to_string()")]
    port: String,

    /// baud rate
    #[argh(option, short = 'b', default = "common::BAUDRATE")]
    baud: u32,

    /// send a start command before listening
    #[argh(switch, short = 's')]
    start: bool,

    /// radio band for the start command (US or EU)
    #[argh(option, default = "String::from(\"US\")")]
    band: String,

    /// radio channel for the start command (0-25)
    #[argh(option, default = "0")]
    chan: u16,
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

    if args.start {
        let sent = Band::from_str(&args.band)
            .and_then(|band| StartCommand::new(band, args.chan, "Fluctus".to_string()))
            .and_then(|command| transport.send_command(&command));
        match sent {
            Ok(()) => println!("Sent start command on channel {}", args.chan),
            Err(e) => {
                eprintln!("Failed to send start command: {}", e);
                process::exit(1);
            }
        }
    }

    println!("Listening on {} at {} baud...", args.port, args.baud);

    loop {
        match transport.read_packet() {
            Ok(packet) => {
                let now = Local::now();
                println!(
                    "{} - uid {} status {:?} altitude {} batt {} mV",
                    now.format("%Y-%m-%d %H:%M:%S%.3f"),
                    packet.uid,
                    packet.status,
                    packet.altitude,
                    packet.batt_voltage
                );
            }
            Err(FluctusError::ReadTimeout(_)) => {
                // Nothing on the wire yet, keep polling
            }
            Err(e) => {
                eprintln!("Error reading packet: {}", e);
            }
        }

        // Prevent busy-waiting
        thread::sleep(Duration::from_millis(10));
    }
}
