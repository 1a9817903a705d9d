use std::str::FromStr;

use crate::error::{FluctusError, Result};

/// Acknowledgement sent by the ground station after a start command,
/// e.g. `Gstartok123`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SteadyReply {
    pub firmware_id: u8,
}

impl FromStr for SteadyReply {
    type Err = FluctusError;

    fn from_str(input: &str) -> Result<Self> {
        let num_part = input.trim().strip_prefix("Gstartok").ok_or_else(|| {
            FluctusError::InvalidReply("input does not start with 'Gstartok'".to_string())
        })?;
        let firmware_id = num_part.parse::<u8>().map_err(|e| {
            FluctusError::InvalidReply(format!("failed to parse firmware id '{}': {}", num_part, e))
        })?;

        Ok(SteadyReply { firmware_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_response() {
        let reply = SteadyReply::from_str("Gstartok123").unwrap();
        assert_eq!(reply.firmware_id, 123);
    }

    #[test]
    fn test_rejects_other_prefixes() {
        assert!(SteadyReply::from_str("Gstopok123").is_err());
        assert!(SteadyReply::from_str("Gstartokfoo").is_err());
    }
}
