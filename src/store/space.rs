//! Thread-Safe Tuple Space
//!
//! This module implements the core store: a concurrent map from keys to
//! values with exactly three operations — insert-if-absent, take (read and
//! remove), and peek (read in place).
//!
//! ## Design Decisions
//!
//! 1. **Sharded Locks**: Instead of one big lock, we use multiple shards to
//!    reduce contention. Unrelated keys never serialize on each other.
//! 2. **Check-and-act under one lock**: the presence check and the mutation
//!    it gates happen under a single shard write lock, so two concurrent
//!    inserts of the same key can never both succeed and two concurrent
//!    takes can never both win.
//! 3. **No update-in-place**: a tuple is created by a successful insert,
//!    destroyed by a successful take, and immutable in between.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       TupleSpace                            │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │ Shard N │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ RwLock  │           │
//! │  │ HashMap │ │ HashMap │ │ HashMap │ │ HashMap │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys are distributed across shards using a hash function. Every operation
//! touches exactly one shard and holds its lock only for the check-and-act
//! window, so operations complete in O(1) regardless of how many other keys
//! are resident.

use crate::stats::ServerStats;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, RwLock};

/// Number of shards for the store.
/// More shards = less lock contention, but more memory overhead.
const NUM_SHARDS: usize = 64;

/// Outcome of an insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The key was absent and the tuple is now resident.
    Inserted,
    /// The key was already present; nothing was mutated.
    AlreadyExists,
}

/// A single shard containing a portion of the resident tuples.
#[derive(Debug)]
struct Shard {
    tuples: RwLock<HashMap<String, String>>,
}

impl Shard {
    fn new() -> Self {
        Self {
            tuples: RwLock::new(HashMap::new()),
        }
    }
}

/// The concurrent tuple space.
///
/// Designed to be wrapped in an `Arc` and shared across all connection
/// tasks. All operations are thread-safe and atomic with respect to the
/// presence check that gates them.
///
/// The store owns a reference to the server counters and records every
/// operation outcome on them, including the resident key/value length sums
/// used for O(1) average-size reporting.
///
/// # Example
///
/// ```
/// use tuplespace::stats::ServerStats;
/// use tuplespace::store::{InsertOutcome, TupleSpace};
/// use std::sync::Arc;
///
/// let space = TupleSpace::new(Arc::new(ServerStats::new()));
///
/// assert_eq!(
///     space.insert("x".to_string(), "hello".to_string()),
///     InsertOutcome::Inserted
/// );
/// assert_eq!(space.peek("x"), Some("hello".to_string()));
/// assert_eq!(space.take("x"), Some("hello".to_string()));
/// assert_eq!(space.take("x"), None);
/// ```
#[derive(Debug)]
pub struct TupleSpace {
    /// Sharded storage for reduced lock contention
    shards: Vec<Shard>,

    /// Server counters, updated by every operation
    stats: Arc<ServerStats>,
}

impl TupleSpace {
    /// Creates an empty tuple space recording onto the given counters.
    pub fn new(stats: Arc<ServerStats>) -> Self {
        let shards = (0..NUM_SHARDS).map(|_| Shard::new()).collect();

        Self { shards, stats }
    }

    /// Determines which shard a key belongs to.
    #[inline]
    fn shard_index(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }

    /// Gets the shard for a given key.
    #[inline]
    fn get_shard(&self, key: &str) -> &Shard {
        &self.shards[self.shard_index(key)]
    }

    /// Inserts a tuple only if its key is absent.
    ///
    /// The presence check and the insertion happen under one shard write
    /// lock, so of any number of concurrent inserts on the same key exactly
    /// one returns [`InsertOutcome::Inserted`].
    ///
    /// On success the insert counter, the resident tuple count, and the
    /// resident length sums are updated; on failure only the error counter.
    pub fn insert(&self, key: String, value: String) -> InsertOutcome {
        let shard = self.get_shard(&key);
        let mut tuples = shard.tuples.write().unwrap();

        if tuples.contains_key(&key) {
            self.stats.error_recorded();
            return InsertOutcome::AlreadyExists;
        }

        self.stats.insert_recorded(key.len(), value.len());
        tuples.insert(key, value);

        InsertOutcome::Inserted
    }

    /// Atomically reads and removes the tuple for a key.
    ///
    /// The check-and-remove happens under one shard write lock, so
    /// concurrent takes on the same key yield exactly one winner.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if the key was absent.
    pub fn take(&self, key: &str) -> Option<String> {
        let shard = self.get_shard(key);
        let mut tuples = shard.tuples.write().unwrap();

        match tuples.remove(key) {
            Some(value) => {
                self.stats.take_recorded(key.len(), value.len());
                Some(value)
            }
            None => {
                self.stats.error_recorded();
                None
            }
        }
    }

    /// Reads the value for a key without removing it.
    ///
    /// Takes only a shard read lock and never touches the resident length
    /// sums.
    pub fn peek(&self, key: &str) -> Option<String> {
        let shard = self.get_shard(key);
        let tuples = shard.tuples.read().unwrap();

        match tuples.get(key) {
            Some(value) => {
                self.stats.peek_recorded();
                Some(value.clone())
            }
            None => {
                self.stats.error_recorded();
                None
            }
        }
    }

    /// Returns the number of resident tuples.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.tuples.read().unwrap().len())
            .sum()
    }

    /// Returns true if no tuples are resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
