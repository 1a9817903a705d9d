use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::str::FromStr;
use std::time::Duration;

use serialport::SerialPort;

use crate::constants::common;
use crate::error::{FluctusError, Result};
use crate::protocol::command::Command;
use crate::protocol::packet::FluctusPacket;

/// Line-oriented serial link to a Fluctus ground station (or to whatever
/// pretends to be one).
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    port_name: String,
}

impl SerialTransport {
    /// Opens the serial port with the standard read timeout.
    pub fn new(port_name: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(common::SERIAL_TIMEOUT_MS))
            .open()?;

        Ok(SerialTransport {
            port,
            port_name: port_name.to_string(),
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Sends a command over the serial connection
    pub fn send_command<T: Command>(&mut self, command: &T) -> Result<()> {
        self.port.write_all(command.to_wire().as_bytes())?;
        Ok(())
    }

    /// Reads one line and parses it as a telemetry packet.
    pub fn read_packet(&mut self) -> Result<FluctusPacket> {
        let line = self.read_line()?;
        FluctusPacket::from_str(line.trim())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut reader = BufReader::new(&mut self.port);
        let mut output = String::new();

        match reader.read_line(&mut output) {
            Ok(0) => Err(FluctusError::PortClosed),
            Ok(_) => Ok(output),
            Err(e) if e.kind() == ErrorKind::TimedOut => {
                Err(FluctusError::ReadTimeout(self.port_name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

// The send loop only needs a byte sink, so the transport doubles as one.
impl Write for SerialTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}
