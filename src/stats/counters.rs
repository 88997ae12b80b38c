//! Server-Wide Counters
//!
//! This module defines the running counters shared by the store and the
//! connection layer. The counters are plain relaxed atomics: every update is
//! a single `fetch_add`/`fetch_sub`, so hot paths never take a lock to
//! record an event.
//!
//! The struct is explicitly owned — it is created once at startup, wrapped
//! in an `Arc`, and handed to whoever needs to record or read. There is no
//! global singleton.
//!
//! ## Resident Length Sums
//!
//! `key_bytes` and `value_bytes` track the byte lengths of all currently
//! resident tuples. Inserts add to them, takes subtract the removed tuple's
//! lengths, so average sizes come out of [`ServerStats::snapshot`] in O(1)
//! without rescanning the store.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters for the whole server.
#[derive(Debug, Default)]
pub struct ServerStats {
    /// Total number of connections accepted over the process lifetime
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total request lines received over the process lifetime
    pub requests_processed: AtomicU64,
    /// Successful insert operations
    pub inserts: AtomicU64,
    /// Successful take operations
    pub takes: AtomicU64,
    /// Successful peek operations
    pub peeks: AtomicU64,
    /// Failed requests of any kind
    pub errors: AtomicU64,
    /// Tuples currently resident in the store
    pub tuples: AtomicU64,
    /// Sum of key byte lengths for resident tuples
    pub key_bytes: AtomicU64,
    /// Sum of value byte lengths for resident tuples
    pub value_bytes: AtomicU64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an accepted connection.
    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a closed connection.
    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    /// Records one received request line.
    pub fn request_processed(&self) {
        self.requests_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful insert of a tuple with the given byte lengths.
    pub fn insert_recorded(&self, key_len: usize, value_len: usize) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        self.tuples.fetch_add(1, Ordering::Relaxed);
        self.key_bytes.fetch_add(key_len as u64, Ordering::Relaxed);
        self.value_bytes
            .fetch_add(value_len as u64, Ordering::Relaxed);
    }

    /// Records a successful take of a tuple with the given byte lengths.
    pub fn take_recorded(&self, key_len: usize, value_len: usize) {
        self.takes.fetch_add(1, Ordering::Relaxed);
        self.tuples.fetch_sub(1, Ordering::Relaxed);
        self.key_bytes.fetch_sub(key_len as u64, Ordering::Relaxed);
        self.value_bytes
            .fetch_sub(value_len as u64, Ordering::Relaxed);
    }

    /// Records a successful peek.
    pub fn peek_recorded(&self) {
        self.peeks.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed request.
    pub fn error_recorded(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of all counters.
    ///
    /// The reads are relaxed and independent, so a snapshot racing with
    /// updates may be off by in-flight operations; it is meant for
    /// reporting, not for invariant checks.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            connections_accepted: self.connections_accepted.load(Ordering::Relaxed),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            requests_processed: self.requests_processed.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            takes: self.takes.load(Ordering::Relaxed),
            peeks: self.peeks.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            tuples: self.tuples.load(Ordering::Relaxed),
            key_bytes: self.key_bytes.load(Ordering::Relaxed),
            value_bytes: self.value_bytes.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of the server counters.
#[derive(Debug, Clone, Copy)]
pub struct StatsSnapshot {
    pub connections_accepted: u64,
    pub active_connections: u64,
    pub requests_processed: u64,
    pub inserts: u64,
    pub takes: u64,
    pub peeks: u64,
    pub errors: u64,
    pub tuples: u64,
    pub key_bytes: u64,
    pub value_bytes: u64,
}

impl StatsSnapshot {
    /// Average key size in bytes across resident tuples.
    pub fn avg_key_size(&self) -> u64 {
        if self.tuples == 0 {
            0
        } else {
            self.key_bytes / self.tuples
        }
    }

    /// Average value size in bytes across resident tuples.
    pub fn avg_value_size(&self) -> u64 {
        if self.tuples == 0 {
            0
        } else {
            self.value_bytes / self.tuples
        }
    }

    /// Average total tuple size in bytes across resident tuples.
    pub fn avg_tuple_size(&self) -> u64 {
        if self.tuples == 0 {
            0
        } else {
            (self.key_bytes + self.value_bytes) / self.tuples
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tuples: {}, avg tuple size: {}, avg key size: {}, avg value size: {}, \
             clients: {} ({} active), requests: {}, inserts: {}, takes: {}, peeks: {}, errors: {}",
            self.tuples,
            self.avg_tuple_size(),
            self.avg_key_size(),
            self.avg_value_size(),
            self.connections_accepted,
            self.active_connections,
            self.requests_processed,
            self.inserts,
            self.takes,
            self.peeks,
            self.errors,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_lifecycle() {
        let stats = ServerStats::new();

        stats.connection_opened();
        stats.connection_opened();
        stats.connection_closed();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.connections_accepted, 2);
        assert_eq!(snapshot.active_connections, 1);
    }

    #[test]
    fn test_resident_sums_track_insert_and_take() {
        let stats = ServerStats::new();

        stats.insert_recorded(3, 10);
        stats.insert_recorded(5, 20);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.tuples, 2);
        assert_eq!(snapshot.key_bytes, 8);
        assert_eq!(snapshot.value_bytes, 30);

        stats.take_recorded(3, 10);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.tuples, 1);
        assert_eq!(snapshot.key_bytes, 5);
        assert_eq!(snapshot.value_bytes, 20);
    }

    #[test]
    fn test_averages() {
        let stats = ServerStats::new();

        stats.insert_recorded(2, 10);
        stats.insert_recorded(4, 20);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.avg_key_size(), 3);
        assert_eq!(snapshot.avg_value_size(), 15);
        assert_eq!(snapshot.avg_tuple_size(), 18);
    }

    #[test]
    fn test_averages_with_no_tuples() {
        let snapshot = ServerStats::new().snapshot();
        assert_eq!(snapshot.avg_key_size(), 0);
        assert_eq!(snapshot.avg_value_size(), 0);
        assert_eq!(snapshot.avg_tuple_size(), 0);
    }

    #[test]
    fn test_display_smoke() {
        let stats = ServerStats::new();
        stats.insert_recorded(1, 5);
        let line = stats.snapshot().to_string();
        assert!(line.contains("tuples: 1"));
        assert!(line.contains("inserts: 1"));
    }
}
