use std::str::FromStr;

use crate::error::{FluctusError, Result};

/// A command that can be sent to the ground station over the serial link.
pub trait Command {
    fn to_wire(&self) -> String;
    fn from_wire(command_str: &str) -> Result<Self>
    where
        Self: Sized;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Band {
    US,
    EU,
}

impl Band {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Band::US),
            1 => Ok(Band::EU),
            _ => Err(FluctusError::InvalidCommand(format!(
                "invalid band value: {}",
                value
            ))),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Band::US => 0,
            Band::EU => 1,
        }
    }
}

impl FromStr for Band {
    type Err = FluctusError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "US" => Ok(Band::US),
            "EU" => Ok(Band::EU),
            _ => Err(FluctusError::InvalidCommand(format!(
                "invalid band string: {}",
                value
            ))),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PingCommand;

impl Command for PingCommand {
    fn to_wire(&self) -> String {
        "ping\n".to_string()
    }

    fn from_wire(command: &str) -> Result<Self> {
        if command != "ping\n" {
            return Err(FluctusError::InvalidCommand(
                "expected 'ping\\n'".to_string(),
            ));
        }
        Ok(PingCommand)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ArmCommand;

impl Command for ArmCommand {
    // The wire form for arming is "startf", not "arm".
    fn to_wire(&self) -> String {
        "startf\n".to_string()
    }

    fn from_wire(command: &str) -> Result<Self> {
        if command != "arm\n" {
            return Err(FluctusError::InvalidCommand(
                "expected 'arm\\n'".to_string(),
            ));
        }
        Ok(ArmCommand)
    }
}

/// Starts telemetry: `start<band><chan:02><device>\n`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StartCommand {
    pub band: Band,
    pub chan: u16,
    pub device: String,
}

impl StartCommand {
    pub fn new(band: Band, chan: u16, device: String) -> Result<Self> {
        if chan > 25 {
            return Err(FluctusError::InvalidCommand(format!(
                "channel {} out of range (0-25)",
                chan
            )));
        }
        if device != "Fluctus" {
            return Err(FluctusError::InvalidCommand(format!(
                "invalid device name '{}'",
                device
            )));
        }

        Ok(StartCommand { band, chan, device })
    }
}

impl Command for StartCommand {
    fn to_wire(&self) -> String {
        format!("start{}{:02}{}\n", self.band.to_u8(), self.chan, self.device)
    }

    fn from_wire(command: &str) -> Result<Self> {
        let rest = command.strip_prefix("start").ok_or_else(|| {
            FluctusError::InvalidCommand("does not start with 'start'".to_string())
        })?;

        let mut chars = rest.chars();

        let band_char = chars
            .next()
            .ok_or_else(|| FluctusError::InvalidCommand("missing band value".to_string()))?;
        let band_u8 = band_char
            .to_digit(10)
            .ok_or_else(|| FluctusError::InvalidCommand("invalid band character".to_string()))?
            as u8;
        let band = Band::from_u8(band_u8)?;

        let chan_str: String = chars.by_ref().take(2).collect();
        let chan: u16 = chan_str
            .parse()
            .map_err(|_| FluctusError::InvalidCommand("invalid channel format".to_string()))?;

        let device: String = chars.take_while(|&c| c != '\n').collect();

        StartCommand::new(band, chan, device)
    }
}
