//! Tools for the Fluctus SGS serial interface: a hardware emulator that
//! replays a known-good telemetry packet, and the protocol pieces needed to
//! read it back (packet, command and reply parsing over a serial transport).

pub mod constants;
pub mod emulator;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod utils;

pub use emulator::Emulator;
pub use error::{FluctusError, Result};
pub use protocol::command::{ArmCommand, Band, Command, PingCommand, StartCommand};
pub use protocol::packet::{FlightStatus, FluctusPacket, PacketMeta, RollingMessage};
pub use protocol::response::SteadyReply;
pub use transport::serial::SerialTransport;
