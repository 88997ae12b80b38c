//! Store Module
//!
//! The concurrent tuple space: a sharded key→value map offering three
//! atomic operations — insert-if-absent, take (read and remove), and peek
//! (read in place).
//!
//! A key is resident exactly when it was inserted and has not yet been
//! taken. There is no update-in-place and no expiry; the only way a tuple
//! leaves the store is a successful take.

pub mod space;

// Re-export commonly used types
pub use space::{InsertOutcome, TupleSpace};
