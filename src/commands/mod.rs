//! Request Execution Module
//!
//! This module implements the request processing layer of the server.
//! It receives decoded frame payloads, executes them against the tuple
//! space, and returns typed responses.
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  Frame Codec    │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RequestHandler  │  (this module)
//! │                 │
//! │  - Parse        │
//! │  - Dispatch     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TupleSpace    │  (store module)
//! └─────────────────┘
//! ```

pub mod handler;

// Re-export the main request handler
pub use handler::RequestHandler;
