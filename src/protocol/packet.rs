use std::str::FromStr;

use serde::Serialize;

use crate::error::{FluctusError, Result};

/// Rotating auxiliary value carried in the tail of every telemetry packet.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum RollingMessage {
    MaxAltitude(i32),
    MaxSpeedVert(i16),
    MaxAccelGlob(i16),

    // For if packet is corrupted - store raw data.
    Unknown(u8, [u8; 3]),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum FlightStatus {
    Idle,
    Armed,
    CountdownEngaged,
    WaitingForLaunch,
    Ascent,
    Descent,
    Touchdown,
    Unknown(u8), // For any unrecognised status codes (error state tho)
}

impl From<u8> for FlightStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => FlightStatus::Idle,
            1 => FlightStatus::Armed,
            2 => FlightStatus::CountdownEngaged,
            3 => FlightStatus::WaitingForLaunch,
            4 => FlightStatus::Ascent,
            5 => FlightStatus::Descent,
            6 => FlightStatus::Touchdown,
            _ => FlightStatus::Unknown(value),
        }
    }
}

/// One decoded binary telemetry frame (`FB...` on the wire).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct FluctusPacket {
    pub uid: u16,
    pub fw: u16,
    pub rx: u8,
    pub time_mpu: i32,
    pub status: FlightStatus,
    pub altitude: i32,
    pub speed_vert: i16,
    pub accel: i16,
    pub angle: u8,
    pub batt_voltage: i16,
    pub time: i16,
    pub pyro_states: u8,
    pub log_status: i8,
    pub gps_lat: i32,
    pub gps_lng: i32,
    pub gps_state: i8,
    pub warn_code: u8,

    pub rolling_message: RollingMessage,

    // These are optional fields as per documentation
    pub user_in1: Option<i16>,
    pub user_in2: Option<i16>,
}

/// Link-quality trailer appended by the ground station (`|Grssi-65/Gsnr6`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct PacketMeta {
    pub rssi: i16,
    pub snr: i16,
}

impl FromStr for PacketMeta {
    type Err = FluctusError;

    fn from_str(code: &str) -> Result<Self> {
        let meta_section = code
            .trim()
            .split('|')
            .nth(1)
            .ok_or_else(|| FluctusError::InvalidPacket("missing meta section".into()))?;
        let mut meta_parts = meta_section.split('/');

        let rssi = parse_meta_field(meta_parts.next().unwrap_or(""), "Grssi")?;
        let snr = parse_meta_field(meta_parts.next().unwrap_or(""), "Gsnr")?;

        Ok(PacketMeta { rssi, snr })
    }
}

fn parse_meta_field(part: &str, prefix: &str) -> Result<i16> {
    let value = part
        .strip_prefix(prefix)
        .ok_or_else(|| FluctusError::InvalidPacket(format!("expected '{}' in '{}'", prefix, part)))?;
    value
        .parse::<i16>()
        .map_err(|e| FluctusError::InvalidPacket(format!("bad {} value '{}': {}", prefix, value, e)))
}

fn extract_hex_payload(code: &str) -> Result<&str> {
    let frame = code
        .trim()
        .split('|')
        .next()
        .unwrap_or_default()
        .trim();

    if !frame.starts_with('F') {
        return Err(FluctusError::InvalidPacket(
            "first character is not 'F'".into(),
        ));
    }
    // 'B' marks a binary frame. The documentation also describes an ASCII 'C'
    // type, which this library does not decode.
    if frame.as_bytes().get(1) != Some(&b'B') {
        return Err(FluctusError::InvalidPacket(
            "second character is not 'B', frame is corrupted or unsupported".into(),
        ));
    }

    Ok(&frame[2..])
}

fn decode_hex(hex_str: &str) -> Result<Vec<u8>> {
    if hex_str.len() % 2 != 0 {
        return Err(FluctusError::InvalidPacket(
            "odd number of hex digits".into(),
        ));
    }
    (0..hex_str.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex_str[i..i + 2], 16).map_err(|_| {
                FluctusError::InvalidPacket(format!("invalid hex pair '{}'", &hex_str[i..i + 2]))
            })
        })
        .collect()
}

/// Reads a sign-extended little-endian 24-bit integer.
fn i24_le(b: [u8; 3]) -> i32 {
    let raw = ((b[2] as i32) << 16) | ((b[1] as i32) << 8) | (b[0] as i32);
    if (raw & 0x80_0000) != 0 {
        raw | !0xFF_FFFF
    } else {
        raw
    }
}

impl FromStr for FluctusPacket {
    type Err = FluctusError;

    fn from_str(code: &str) -> Result<Self> {
        let hex_str = extract_hex_payload(code)?;
        let bytes = decode_hex(hex_str)?;
        FluctusPacket::from_bytes(&bytes)
    }
}

impl FluctusPacket {
    /// Decodes the binary payload (the hex-encoded part after the `FB` marker).
    ///
    /// The fixed section is 35 bytes; a rolling message value needs 38 and the
    /// optional user inputs 42.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 35 {
            return Err(FluctusError::InvalidPacket(format!(
                "payload too short: {} bytes, expected at least 35",
                bytes.len()
            )));
        }

        let rolling_type = bytes[34];
        let rolling_message = match rolling_type {
            b'A' | b'S' | b'G' => {
                if bytes.len() < 38 {
                    return Err(FluctusError::InvalidPacket(
                        "payload too short for rolling message value".into(),
                    ));
                }
                let value = i24_le([bytes[35], bytes[36], bytes[37]]);
                match rolling_type {
                    b'A' => RollingMessage::MaxAltitude(value),
                    b'S' => RollingMessage::MaxSpeedVert(value as i16),
                    _ => RollingMessage::MaxAccelGlob(value as i16),
                }
            }
            _ => {
                let raw = if bytes.len() >= 38 {
                    [bytes[35], bytes[36], bytes[37]]
                } else {
                    [0; 3]
                };
                RollingMessage::Unknown(rolling_type, raw)
            }
        };

        let (user_in1, user_in2) = if bytes.len() >= 42 {
            (
                Some(i16::from_le_bytes([bytes[38], bytes[39]])),
                Some(i16::from_le_bytes([bytes[40], bytes[41]])),
            )
        } else {
            (None, None)
        };

        Ok(FluctusPacket {
            uid: u16::from_le_bytes([bytes[0], bytes[1]]),
            fw: u16::from_le_bytes([bytes[2], bytes[3]]),
            rx: bytes[4],
            time_mpu: i32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]),
            status: FlightStatus::from(bytes[9]),
            // altitude is a 24 bit integer
            altitude: i24_le([bytes[10], bytes[11], bytes[12]]),
            speed_vert: i16::from_le_bytes([bytes[13], bytes[14]]),
            accel: i16::from_le_bytes([bytes[15], bytes[16]]),
            angle: bytes[17],
            batt_voltage: i16::from_le_bytes([bytes[18], bytes[19]]),
            time: i16::from_le_bytes([bytes[20], bytes[21]]),
            pyro_states: bytes[22],
            log_status: bytes[23] as i8,
            gps_lat: i32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
            gps_lng: i32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]),
            gps_state: bytes[32] as i8,
            warn_code: bytes[33],
            rolling_message,
            user_in1,
            user_in2,
        })
    }
}

// Test values taken from the interface documentation
// http://silicdyne.net//resources/docs/fluctus_sgs_interface_protocol_1_7b.pdf
#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::common;

    #[test]
    fn test_documentation_packet() {
        let packet = FluctusPacket::from_str(common::TEST_PACKET.trim()).unwrap();

        assert_eq!(packet.uid, 62, "UID does not match documentation value");
        assert_eq!(packet.fw, 263, "FW does not match documentation value");
        assert_eq!(packet.rx, 0);
        // Documentation lists a different value here, but this is what the
        // example bytes decode to.
        assert_eq!(packet.time_mpu, 122302);
        assert_eq!(packet.status, FlightStatus::Idle);
        assert_eq!(packet.altitude, 0);
        assert_eq!(packet.speed_vert, 0);
        assert_eq!(packet.accel, 108);
        assert_eq!(packet.angle, 170);
        assert_eq!(packet.batt_voltage, 4233);
        assert_eq!(packet.time, -100);
        assert_eq!(packet.log_status, 101);
        assert_eq!(packet.warn_code, 14);
        assert_eq!(packet.rolling_message, RollingMessage::MaxSpeedVert(0));
        assert_eq!(packet.user_in1, None);
        assert_eq!(packet.user_in2, None);
    }

    #[test]
    fn test_documentation_meta() {
        let meta = PacketMeta::from_str(common::TEST_PACKET).unwrap();
        assert_eq!(meta.rssi, -65);
        assert_eq!(meta.snr, 6);
    }

    #[test]
    fn test_meta_missing_section() {
        let result = PacketMeta::from_str("FB3E0007");
        assert!(result.is_err(), "expected error for missing meta trailer");
    }

    #[test]
    fn test_rejects_ascii_frame() {
        let result = FluctusPacket::from_str("FC48454C4C4F|Grssi-65/Gsnr6");
        assert!(result.is_err(), "ASCII 'FC' frames are not supported");
    }

    #[test]
    fn test_rejects_short_payload() {
        let result = FluctusPacket::from_str("FB3E0007|Grssi-65/Gsnr6");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_hex() {
        let result = FluctusPacket::from_str("FBZZ3E00070100BEDD0100|Grssi-65/Gsnr6");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_status_and_rolling_type() {
        let mut bytes = vec![0u8; 38];
        bytes[9] = 42;
        bytes[34] = b'X';
        bytes[35] = 1;
        let packet = FluctusPacket::from_bytes(&bytes).unwrap();
        assert_eq!(packet.status, FlightStatus::Unknown(42));
        assert_eq!(
            packet.rolling_message,
            RollingMessage::Unknown(b'X', [1, 0, 0])
        );
    }

    #[test]
    fn test_negative_altitude_sign_extension() {
        let mut bytes = vec![0u8; 38];
        // -2 as 24-bit little-endian
        bytes[10] = 0xFE;
        bytes[11] = 0xFF;
        bytes[12] = 0xFF;
        bytes[34] = b'A';
        let packet = FluctusPacket::from_bytes(&bytes).unwrap();
        assert_eq!(packet.altitude, -2);
    }

    #[test]
    fn test_user_inputs_present() {
        let mut bytes = vec![0u8; 42];
        bytes[34] = b'A';
        bytes[38] = 0x10;
        bytes[40] = 0xFF;
        bytes[41] = 0xFF;
        let packet = FluctusPacket::from_bytes(&bytes).unwrap();
        assert_eq!(packet.user_in1, Some(16));
        assert_eq!(packet.user_in2, Some(-1));
    }
}
