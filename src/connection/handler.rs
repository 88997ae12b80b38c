//! Connection Handler Module
//!
//! This module handles individual client connections. Each client gets its
//! own handler task that runs in a loop, reading framed request lines and
//! sending framed responses.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. ConnectionHandler spawned, registered with Stats
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Read bytes from socket  │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Extract line, decode    │ │
//!    │  │ frame                   │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Execute request         │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Send framed response    │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. Client disconnects / transport error
//!        │
//!        ▼
//! 5. Deregistered from Stats, task ends
//! ```
//!
//! A malformed request is answered with an `ERR` line and the loop
//! continues; only a transport-level failure or peer disconnect ends the
//! session. Within one connection, responses go out strictly in request
//! order.
//!
//! ## Buffer Management
//!
//! We use a BytesMut buffer to accumulate incoming data. This is important
//! because TCP is a stream protocol - we might receive partial lines,
//! or multiple lines in a single read.

use crate::commands::RequestHandler;
use crate::protocol::{frame, Response};
use crate::stats::ServerStats;
use bytes::BytesMut;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::{debug, error, info, trace, warn};

/// Maximum size for the read buffer (64 KB)
const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Handles a single client connection.
///
/// This struct manages the read buffer, framing, and response sending
/// for one connected client.
pub struct ConnectionHandler {
    /// The TCP stream for this connection
    stream: BufWriter<TcpStream>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// Buffer for incoming data
    buffer: BytesMut,

    /// The request handler (shared store and counters)
    handler: RequestHandler,

    /// Server counters (shared)
    stats: Arc<ServerStats>,
}

impl ConnectionHandler {
    /// Creates a new connection handler and registers the connection with
    /// the server counters.
    ///
    /// # Arguments
    ///
    /// * `stream` - The TCP stream for this connection
    /// * `addr` - The client's socket address
    /// * `handler` - The request handler for executing requests
    /// * `stats` - Shared server counters
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        handler: RequestHandler,
        stats: Arc<ServerStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            handler,
            stats,
        }
    }

    /// Runs the main connection loop.
    ///
    /// This method reads requests from the client, executes them,
    /// and sends back responses until the client disconnects or an error
    /// occurs. The connection is deregistered from the counters on every
    /// exit path.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected gracefully"),
            Err(e) => match e {
                ConnectionError::ClientDisconnected => {
                    debug!(client = %self.addr, "Client disconnected")
                }
                ConnectionError::IoError(io_err)
                    if io_err.kind() == std::io::ErrorKind::ConnectionReset =>
                {
                    debug!(client = %self.addr, "Connection reset by client")
                }
                _ => warn!(client = %self.addr, error = %e, "Connection error"),
            },
        }

        self.stats.connection_closed();
        result
    }

    /// The main read-execute-respond loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            // Drain every complete line already buffered
            while let Some(line) = self.next_line() {
                self.stats.request_processed();
                let payload = self.process_line(&line);
                self.send_response(&payload).await?;
            }

            // Need more data - read from the socket
            self.read_more_data().await?;
        }
    }

    /// Extracts the next complete line from the buffer, if any.
    ///
    /// The line terminator is stripped, along with a preceding `\r` if the
    /// peer sends CRLF endings.
    fn next_line(&mut self) -> Option<String> {
        let pos = self.buffer.iter().position(|&b| b == b'\n')?;

        let mut line = self.buffer.split_to(pos + 1);
        line.truncate(pos);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }

        trace!(
            client = %self.addr,
            consumed = pos + 1,
            remaining = self.buffer.len(),
            "Extracted request line"
        );

        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Decodes one request line and produces the response payload.
    ///
    /// A framing error is answered, not propagated: the connection stays
    /// open and the next line is processed normally.
    fn process_line(&self, line: &str) -> String {
        match frame::decode(line) {
            Ok(payload) => self.handler.execute(payload).payload(),
            Err(e) => {
                warn!(client = %self.addr, error = %e, "Malformed frame");
                self.stats.error_recorded();
                Response::error(e.to_string()).payload()
            }
        }
    }

    /// Reads more data from the socket into the buffer.
    async fn read_more_data(&mut self) -> Result<(), ConnectionError> {
        // Check buffer size limit
        if self.buffer.len() >= MAX_BUFFER_SIZE {
            error!(
                client = %self.addr,
                size = self.buffer.len(),
                "Buffer size limit exceeded"
            );
            return Err(ConnectionError::BufferFull);
        }

        // Ensure we have some capacity
        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(4096);
        }

        // Read data
        let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;

        if n == 0 {
            // Connection closed by client
            if self.buffer.is_empty() {
                return Err(ConnectionError::ClientDisconnected);
            } else {
                // Partial line in buffer
                return Err(ConnectionError::UnexpectedEof);
            }
        }

        trace!(client = %self.addr, bytes = n, "Read data");

        Ok(())
    }

    /// Frames a response payload and sends it as one line.
    ///
    /// If the payload does not fit in a frame, a short generic error line
    /// is substituted for the oversized one.
    async fn send_response(&mut self, payload: &str) -> Result<(), ConnectionError> {
        let line = match frame::encode(payload) {
            Ok(line) => line,
            Err(e) => {
                warn!(client = %self.addr, error = %e, "Response exceeded frame limit");
                frame::encode("ERR response too large").expect("fallback fits in a frame")
            }
        };

        self.stream.write_all(line.as_bytes()).await?;
        self.stream.write_all(b"\n").await?;
        self.stream.flush().await?;
        trace!(
            client = %self.addr,
            bytes = line.len() + 1,
            "Sent response"
        );
        Ok(())
    }
}

/// Errors that can occur while handling a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Client disconnected normally
    #[error("Client disconnected")]
    ClientDisconnected,

    /// Unexpected end of stream (partial line)
    #[error("Unexpected end of stream")]
    UnexpectedEof,

    /// Buffer size limit exceeded
    #[error("Buffer size limit exceeded")]
    BufferFull,
}

/// Handles a client connection.
///
/// This is a convenience function that creates a ConnectionHandler
/// and runs it to completion.
///
/// # Arguments
///
/// * `stream` - The TCP stream for this connection
/// * `addr` - The client's socket address
/// * `handler` - The request handler for executing requests
/// * `stats` - Shared server counters
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    handler: RequestHandler,
    stats: Arc<ServerStats>,
) {
    let conn = ConnectionHandler::new(stream, addr, handler, stats);
    if let Err(e) = conn.run().await {
        match e {
            ConnectionError::ClientDisconnected => {}
            ConnectionError::IoError(ref io_err)
                if io_err.kind() == std::io::ErrorKind::ConnectionReset => {}
            _ => {
                debug!(client = %addr, error = %e, "Connection ended with error");
            }
        }
    }
}
