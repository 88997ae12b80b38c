//! Request Handler
//!
//! This module executes decoded request payloads against the tuple space.
//! The payload is parsed once into the closed [`Request`] variant, then
//! dispatched with a single `match`.
//!
//! ## Response Texts
//!
//! ```text
//! P key value   ->  OK (key, value) added      | ERR key already exists
//! G key         ->  OK (key, value) removed    | ERR key does not exist
//! R key         ->  OK (key, value) read       | ERR key does not exist
//! <other>       ->  ERR invalid operation
//! <malformed>   ->  ERR invalid request format
//! ```
//!
//! Store hits and misses are counted by the store itself; the handler only
//! records errors the store never sees (malformed payloads and unknown
//! operation codes).

use crate::protocol::{Request, Response};
use crate::stats::ServerStats;
use crate::store::{InsertOutcome, TupleSpace};
use std::sync::Arc;
use tracing::debug;

/// Executes requests against the tuple space.
///
/// Cheap to clone: one handler is created per connection, all sharing the
/// same store and counters.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    /// The shared tuple space
    space: Arc<TupleSpace>,
    /// Server counters
    stats: Arc<ServerStats>,
}

impl RequestHandler {
    /// Creates a new request handler over the given store and counters.
    pub fn new(space: Arc<TupleSpace>, stats: Arc<ServerStats>) -> Self {
        Self { space, stats }
    }

    /// Executes one decoded frame payload and returns the response.
    pub fn execute(&self, payload: &str) -> Response {
        let request = match Request::parse(payload) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Malformed request payload");
                self.stats.error_recorded();
                return Response::error("invalid request format");
            }
        };

        match request {
            Request::Insert { key, value } => {
                match self.space.insert(key.clone(), value.clone()) {
                    InsertOutcome::Inserted => Response::Added { key, value },
                    InsertOutcome::AlreadyExists => {
                        Response::error(format!("{} already exists", key))
                    }
                }
            }
            Request::Take { key } => match self.space.take(&key) {
                Some(value) => Response::Removed { key, value },
                None => Response::error(format!("{} does not exist", key)),
            },
            Request::Peek { key } => match self.space.peek(&key) {
                Some(value) => Response::Read { key, value },
                None => Response::error(format!("{} does not exist", key)),
            },
            Request::Unknown => {
                self.stats.error_recorded();
                Response::error("invalid operation")
            }
        }
    }
}
