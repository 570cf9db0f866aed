// telemetry/frame.rs
//
// Text framing used by the ground relay and the replay logs:
//   $VEL,<elapsed_ms>,<velocity_down>,<altitude>*HH
// HH is the XOR of every byte between '$' and '*', in hex.
use crate::telemetry::types::VelocitySample;
use crate::types::Timestamp;
use core::fmt;
use heapless::Vec;

pub const FRAME_TAG: &str = "$VEL";
const FIELD_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    InvalidChecksum,
    InvalidUtf8,
    UnknownSentence,
    FieldCount,
    InvalidNumber,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::InvalidChecksum => f.write_str("invalid checksum"),
            FrameError::InvalidUtf8 => f.write_str("frame is not valid UTF-8"),
            FrameError::UnknownSentence => f.write_str("unknown sentence"),
            FrameError::FieldCount => f.write_str("wrong number of fields"),
            FrameError::InvalidNumber => f.write_str("field is not a finite number"),
        }
    }
}

impl core::error::Error for FrameError {}

pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0u8, |acc, &b| acc ^ b)
}

pub fn validate_checksum(line: &[u8]) -> bool {
    let line = line.trim_ascii();
    let mut parts = line.split(|&b| b == b'*');
    let payload = parts.next().unwrap_or(&[]);
    let checksum_hex = parts.next().unwrap_or(&[]);
    if payload.is_empty() || checksum_hex.len() != 2 || parts.next().is_some() {
        return false;
    }

    let start = if payload.starts_with(b"$") { 1 } else { 0 };
    let provided = core::str::from_utf8(checksum_hex)
        .ok()
        .and_then(|s| u8::from_str_radix(s, 16).ok());
    provided == Some(checksum(&payload[start..]))
}

/// Decodes one telemetry line into a sample.
pub fn decode_frame(line: &[u8]) -> Result<VelocitySample, FrameError> {
    let line = line.trim_ascii();
    if !validate_checksum(line) {
        return Err(FrameError::InvalidChecksum);
    }
    let Ok(sentence) = core::str::from_utf8(line) else {
        return Err(FrameError::InvalidUtf8);
    };

    let payload = sentence.split('*').next().unwrap_or("");
    let fields: Vec<&str, 8> = payload.split(',').take(8).collect();
    if fields[0] != FRAME_TAG {
        return Err(FrameError::UnknownSentence);
    }
    if fields.len() != FIELD_COUNT {
        return Err(FrameError::FieldCount);
    }

    let millis = fields[1]
        .parse::<u32>()
        .map_err(|_| FrameError::InvalidNumber)?;
    let velocity_down = parse_finite(fields[2])?;
    let altitude = parse_finite(fields[3])?;

    Ok(VelocitySample::new(
        velocity_down,
        altitude,
        Timestamp::from_millis(millis),
    ))
}

fn parse_finite(raw: &str) -> Result<f32, FrameError> {
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FrameError::InvalidNumber),
    }
}
