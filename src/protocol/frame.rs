//! Length-Prefixed Frame Codec
//!
//! This module implements the codec for the wire framing used by the tuple
//! space protocol. Every request and response travels as a single text line:
//!
//! ```text
//! NNN payload
//! ```
//!
//! `NNN` is a zero-padded 3-digit decimal length covering the *whole* frame:
//! the 3 digit characters, the separating space, and the payload. A frame can
//! therefore never exceed 999 bytes, which caps the payload at 995 bytes.
//!
//! ```text
//! ┌─────┬───┬──────────────────────────────┐
//! │ NNN │ ' '│          payload             │   NNN = len(payload) + 4
//! └─────┴───┴──────────────────────────────┘
//! ```
//!
//! ## Validation Policy
//!
//! The codec validates frames strictly on decode: the declared length must
//! match the actual line length. The server never trusts the client to have
//! framed its request correctly, so a mismatched prefix is rejected rather
//! than silently reinterpreted.
//!
//! The codec deals in complete lines. Splitting the byte stream at newline
//! boundaries (and stripping the terminator) is the connection layer's job.

use thiserror::Error;

/// Size of the frame header: 3 length digits plus the separating space.
pub const HEADER_LEN: usize = 4;

/// Largest total frame length representable by a 3-digit prefix.
pub const MAX_FRAME_LEN: usize = 999;

/// Largest payload that fits in a frame.
pub const MAX_PAYLOAD_LEN: usize = MAX_FRAME_LEN - HEADER_LEN;

/// Errors that can occur while encoding or decoding a frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The line is shorter than the 4-byte header.
    #[error("frame shorter than the 4-byte header")]
    TooShort,

    /// The first 3 characters are not ASCII digits.
    #[error("length prefix is not a 3-digit number")]
    NonNumericPrefix,

    /// The 4th character is not the separating space.
    #[error("missing separator after length prefix")]
    MissingSeparator,

    /// The declared length does not match the actual line length.
    #[error("declared length {declared} does not match frame length {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// The payload does not fit in a 3-digit frame.
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

/// Decodes one frame line and returns its payload.
///
/// The line must not include a trailing line terminator.
///
/// # Errors
///
/// Returns a [`FrameError`] if the line is shorter than the header, the
/// length prefix is not numeric, the separator is missing, or the declared
/// length disagrees with the actual line length.
///
/// # Example
///
/// ```
/// use tuplespace::protocol::frame;
///
/// assert_eq!(frame::decode("013 P x hello").unwrap(), "P x hello");
/// ```
pub fn decode(line: &str) -> Result<&str, FrameError> {
    let bytes = line.as_bytes();

    if bytes.len() < HEADER_LEN {
        return Err(FrameError::TooShort);
    }

    if !bytes[..3].iter().all(u8::is_ascii_digit) {
        return Err(FrameError::NonNumericPrefix);
    }

    if bytes[3] != b' ' {
        return Err(FrameError::MissingSeparator);
    }

    // The prefix is pure ASCII digits, so this parse cannot fail.
    let declared: usize = line[..3].parse().expect("3-digit prefix parses");

    if declared != bytes.len() {
        return Err(FrameError::LengthMismatch {
            declared,
            actual: bytes.len(),
        });
    }

    Ok(&line[HEADER_LEN..])
}

/// Encodes a payload into a frame line.
///
/// The returned line carries no trailing terminator; the transport layer
/// appends one per line.
///
/// # Errors
///
/// Returns [`FrameError::PayloadTooLarge`] if the payload exceeds
/// [`MAX_PAYLOAD_LEN`] bytes.
///
/// # Example
///
/// ```
/// use tuplespace::protocol::frame;
///
/// assert_eq!(frame::encode("P x hello").unwrap(), "013 P x hello");
/// ```
pub fn encode(payload: &str) -> Result<String, FrameError> {
    let length = payload.len() + HEADER_LEN;

    if length > MAX_FRAME_LEN {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }

    Ok(format!("{:03} {}", length, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_simple() {
        assert_eq!(encode("P x hello").unwrap(), "013 P x hello");
        assert_eq!(encode("G x").unwrap(), "007 G x");
    }

    #[test]
    fn test_encode_empty_payload() {
        assert_eq!(encode("").unwrap(), "004 ");
    }

    #[test]
    fn test_encode_max_payload() {
        let payload = "x".repeat(MAX_PAYLOAD_LEN);
        let line = encode(&payload).unwrap();
        assert_eq!(line.len(), MAX_FRAME_LEN);
        assert!(line.starts_with("999 "));
    }

    #[test]
    fn test_encode_oversized_payload() {
        let payload = "x".repeat(MAX_PAYLOAD_LEN + 1);
        assert_eq!(
            encode(&payload),
            Err(FrameError::PayloadTooLarge {
                size: MAX_PAYLOAD_LEN + 1,
                max: MAX_PAYLOAD_LEN,
            })
        );
    }

    #[test]
    fn test_decode_simple() {
        assert_eq!(decode("013 P x hello").unwrap(), "P x hello");
    }

    #[test]
    fn test_decode_empty_payload() {
        assert_eq!(decode("004 ").unwrap(), "");
    }

    #[test]
    fn test_decode_too_short() {
        assert_eq!(decode(""), Err(FrameError::TooShort));
        assert_eq!(decode("01"), Err(FrameError::TooShort));
        assert_eq!(decode("004"), Err(FrameError::TooShort));
    }

    #[test]
    fn test_decode_non_numeric_prefix() {
        assert_eq!(decode("abc hello"), Err(FrameError::NonNumericPrefix));
        assert_eq!(decode("0x9 hello"), Err(FrameError::NonNumericPrefix));
        assert_eq!(decode("P x hello"), Err(FrameError::NonNumericPrefix));
    }

    #[test]
    fn test_decode_missing_separator() {
        assert_eq!(decode("0130Pxhello"), Err(FrameError::MissingSeparator));
    }

    #[test]
    fn test_decode_length_mismatch() {
        assert_eq!(
            decode("020 P x hello"),
            Err(FrameError::LengthMismatch {
                declared: 20,
                actual: 13,
            })
        );
        assert_eq!(
            decode("005 P x hello"),
            Err(FrameError::LengthMismatch {
                declared: 5,
                actual: 13,
            })
        );
    }

    #[test]
    fn test_roundtrip() {
        for payload in ["P x hello", "G key", "R key", "", "value with spaces"] {
            let line = encode(payload).unwrap();
            assert_eq!(decode(&line).unwrap(), payload);
        }
    }

    #[test]
    fn test_roundtrip_max_payload() {
        let payload = "v".repeat(MAX_PAYLOAD_LEN);
        let line = encode(&payload).unwrap();
        assert_eq!(decode(&line).unwrap(), payload);
    }
}
