//! Tuple Space Wire Protocol
//!
//! This module implements the length-prefixed line protocol spoken by tuple
//! space clients.
//!
//! ## Wire Format
//!
//! Each request and response is one newline-terminated line:
//!
//! ```text
//! NNN OP KEY [VALUE]
//! ```
//!
//! `NNN` is a zero-padded 3-digit decimal length equal to the length of the
//! rest of the line plus 4 (the digits and the separating space count
//! themselves). Examples:
//!
//! ```text
//! 013 P x hello          request: insert ("x", "hello")
//! 023 OK (x, hello) added    response
//! 007 G x                request: take "x"
//! 024 ERR x does not exist   response
//! ```
//!
//! The module splits into two layers:
//!
//! - [`frame`]: the length-prefix codec (`NNN payload` ↔ payload)
//! - [`types`]: typed requests and responses parsed from/rendered to payloads

pub mod frame;
pub mod types;

// Re-export commonly used types
pub use frame::{FrameError, MAX_FRAME_LEN, MAX_PAYLOAD_LEN};
pub use types::{Request, RequestError, Response};
