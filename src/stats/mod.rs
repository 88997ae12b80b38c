//! Server Statistics Module
//!
//! Lock-free running counters for the whole server, plus a background task
//! that logs a snapshot at a fixed cadence.
//!
//! The counters are updated from two places:
//!
//! - the store, on every insert/take/peek (success and error counts, the
//!   resident tuple count, and the resident key/value length sums)
//! - the connection layer, on connection open/close and per request line
//!
//! ```text
//! ┌──────────────┐   record    ┌──────────────┐   snapshot   ┌──────────────┐
//! │  TupleSpace  │────────────>│  ServerStats │─────────────>│ StatsReporter│
//! │  Connections │────────────>│  (atomics)   │              │ (Tokio task) │
//! └──────────────┘             └──────────────┘              └──────────────┘
//! ```

pub mod counters;
pub mod reporter;

// Re-export commonly used types
pub use counters::{ServerStats, StatsSnapshot};
pub use reporter::{start_stats_reporter, ReporterConfig, StatsReporter};
