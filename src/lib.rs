//! # TupleSpace - A Concurrent, Network-Accessible Tuple Space
//!
//! TupleSpace is an in-memory associative store served over TCP. It offers
//! exactly three operations, each atomic under concurrent access:
//!
//! - **Insert** (`P key value`): add a tuple only if its key is absent
//! - **Take** (`G key`): atomically read and remove a tuple
//! - **Peek** (`R key`): read a tuple without removing it
//!
//! Requests and responses travel as length-prefixed text lines
//! (`NNN payload`, one line per request, one response per request in
//! order).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             TupleSpace                                  │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│ Connection  │───>│  Request    │                  │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │                  │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘                  │
//! │                                               │                         │
//! │                                               ▼                         │
//! │  ┌─────────────┐    ┌──────────────────────────────────────────────┐   │
//! │  │ Frame Codec │    │               TupleSpace                     │   │
//! │  │ NNN payload │    │  ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ │   │
//! │  │             │    │  │Shard 0 │ │Shard 1 │ │Shard 2 │ │...N    │ │   │
//! │  └─────────────┘    │  │RwLock  │ │RwLock  │ │RwLock  │ │shards  │ │   │
//! │                     │  └────────┘ └────────┘ └────────┘ └────────┘ │   │
//! │                     └──────────────────────────────────────────────┘   │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                     ┌─────────────────────────────────────────────────┐ │
//! │                     │        ServerStats + StatsReporter              │ │
//! │                     │   (atomic counters, background Tokio task)      │ │
//! │                     └─────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use tuplespace::commands::RequestHandler;
//! use tuplespace::connection::handle_connection;
//! use tuplespace::stats::{start_stats_reporter, ServerStats};
//! use tuplespace::store::TupleSpace;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Create the shared counters and the store
//!     let stats = Arc::new(ServerStats::new());
//!     let space = Arc::new(TupleSpace::new(Arc::clone(&stats)));
//!
//!     // Start the periodic stats reporter
//!     let _reporter = start_stats_reporter(Arc::clone(&stats));
//!
//!     // Start listening for connections
//!     let listener = TcpListener::bind("0.0.0.0:51888").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         let handler = RequestHandler::new(Arc::clone(&space), Arc::clone(&stats));
//!         let stats = Arc::clone(&stats);
//!
//!         tokio::spawn(handle_connection(stream, addr, handler, stats));
//!     }
//! }
//! ```
//!
//! ## Wire Protocol
//!
//! One newline-terminated line per request and per response, each prefixed
//! with a zero-padded 3-digit length covering the prefix, the separating
//! space, and the payload:
//!
//! ```text
//! C: 013 P x hello
//! S: 023 OK (x, hello) added
//! C: 007 R x
//! S: 022 OK (x, hello) read
//! C: 007 G x
//! S: 025 OK (x, hello) removed
//! C: 007 G x
//! S: 024 ERR x does not exist
//! ```
//!
//! The prefix caps a frame at 999 bytes (995 bytes of payload). The server
//! validates the declared length of every incoming frame and answers
//! malformed frames with an `ERR` line without closing the session.
//!
//! ## Module Overview
//!
//! - [`protocol`]: frame codec and typed requests/responses
//! - [`store`]: the sharded, thread-safe tuple space
//! - [`commands`]: request execution against the store
//! - [`connection`]: client connection management
//! - [`stats`]: server-wide counters and the periodic reporter
//!
//! ## Design Highlights
//!
//! ### Atomic Check-and-Act
//!
//! Insert and take each perform their presence check and mutation under a
//! single shard write lock. Racing inserts on one key produce exactly one
//! winner; racing takes remove the tuple exactly once.
//!
//! ### Sharded Storage
//!
//! The store is split across independent RwLock shards so unrelated keys
//! never contend on one lock.
//!
//! ### Lock-Free Counters
//!
//! Statistics are relaxed atomics updated inline by the store and the
//! connection layer, including running key/value length sums that make
//! average-size reporting O(1).

pub mod commands;
pub mod connection;
pub mod protocol;
pub mod stats;
pub mod store;

// Re-export commonly used types for convenience
pub use commands::RequestHandler;
pub use connection::{handle_connection, ConnectionError, ConnectionHandler};
pub use protocol::{FrameError, Request, RequestError, Response};
pub use stats::{start_stats_reporter, ReporterConfig, ServerStats, StatsReporter, StatsSnapshot};
pub use store::{InsertOutcome, TupleSpace};

/// Version of TupleSpace
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
