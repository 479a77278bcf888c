//! ladder-hashtable: a single-threaded chained hash table that counts
//! how often each distinct payload was inserted and grows along a fixed
//! ladder of capacities.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a keyed multiset whose placement, comparison and release are
//!   entirely caller-defined, with predictable, stepwise growth.
//! - Layers:
//!   - ChainStore<V>: structural layer. Bucket heads over a `SlotMap`
//!     arena of singly linked nodes; scans a chain with a predicate,
//!     appends at the tail, relinks every node into a new bucket array.
//!     Carries a debug-only reentrancy guard.
//!   - FrequencyTable<T, B>: public API. Owns the store, the capacity
//!     ladder, the growth threshold and the `Behavior`; keeps the
//!     occurrence counters and decides when to grow.
//!
//! Behaviors
//! - `Behavior<T>` supplies `hash`, `equals` and an optional `destroy`.
//!   `DefaultBehavior` covers any `T: Hash + Eq`; `FnBehavior` is built
//!   from plain function pointers and accepts a three-way comparator.
//! - Only equality is used for deduplication. The first payload of each
//!   class stays in the table; later equal payloads bump its frequency and
//!   are dropped.
//!
//! Growth
//! - Checked at the start of every insert, against the state before the
//!   new payload is counted: if the ladder has another rung and
//!   `distinct / capacity` is strictly above the threshold, every node is
//!   rehashed into a bucket array of the next rung.
//! - A threshold of exactly `1.0` disables growth permanently.
//! - All hash calls for a growth step happen before any link is rewritten;
//!   allocation failure leaves the table unchanged.
//! - Capacity never shrinks; there is no removal of single entries.
//!
//! Constraints
//! - Single-threaded: the store is `!Send`/`!Sync` and mutation needs
//!   `&mut self`.
//! - Iteration and snapshot order is bucket order, then insertion order
//!   inside a bucket; it changes whenever the table grows.
//! - `Drop` passes every owned payload to `Behavior::destroy` exactly once.
//!
//! Errors
//! - Construction validates the ladder (non-empty, starts above zero,
//!   strictly ascending) and the threshold (in `(0, 1]`).
//! - `insert`/`find` accept `Option` payloads and reject `None` with
//!   `TableError::InvalidArgument`.
//! - Bucket arrays and snapshots are reserved fallibly and surface
//!   `TableError::AllocationFailure`.
//! - The average chain length of an empty table is defined as `0.0`.

mod behavior;
mod chain_store;
mod config;
mod error;
mod frequency_table;
mod frequency_table_proptest;
mod metrics;
mod reentrancy;

// Public surface
pub use behavior::{Behavior, DefaultBehavior, FnBehavior};
pub use config::{TableConfig, DEFAULT_GROWTH_THRESHOLD, DEFAULT_LADDER};
pub use error::{ConfigError, TableError};
pub use frequency_table::{Entries, Entry, FrequencyTable};
pub use metrics::ChainMetrics;
