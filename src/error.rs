use thiserror::Error;

/// Errors produced while talking to (or pretending to be) a Fluctus device.
#[derive(Debug, Error)]
pub enum FluctusError {
    #[error("invalid packet: {0}")]
    InvalidPacket(String),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("invalid reply: {0}")]
    InvalidReply(String),

    #[error("timeout while reading from {0}")]
    ReadTimeout(String),

    #[error("no data read from port")]
    PortClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

pub type Result<T> = std::result::Result<T, FluctusError>;
