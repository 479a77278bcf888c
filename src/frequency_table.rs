//! FrequencyTable: occurrence counting and ladder-driven growth atop
//! ChainStore.

use crate::behavior::{Behavior, DefaultBehavior};
use crate::chain_store::{self, ChainEntry, ChainStore};
use crate::config::{CapacityLadder, TableConfig};
use crate::error::TableError;
use crate::metrics::ChainMetrics;
use core::fmt;
use core::hash::Hash;

#[derive(Debug)]
pub(crate) struct Counted<T> {
    payload: T,
    frequency: usize,
}

/// Borrowed view of one equivalence class: the payload that first
/// represented it and how many times an equal payload was inserted.
#[derive(Debug, PartialEq)]
pub struct Entry<'a, T> {
    payload: &'a T,
    frequency: usize,
}

impl<'a, T> Entry<'a, T> {
    fn from_counted(counted: &'a Counted<T>) -> Self {
        Self {
            payload: &counted.payload,
            frequency: counted.frequency,
        }
    }

    pub fn payload(&self) -> &'a T {
        self.payload
    }

    pub fn frequency(&self) -> usize {
        self.frequency
    }
}

impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

#[inline]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// Chained hash multiset that counts repeated inserts of equal payloads.
///
/// Each distinct payload (under `B::equals`) is stored once, in bucket
/// `B::hash(payload) % capacity`, together with its frequency. Capacities
/// come from the configured ladder; before each insert the table moves to
/// the next rung if its load factor exceeds the growth threshold.
pub struct FrequencyTable<T, B = DefaultBehavior>
where
    B: Behavior<T>,
{
    behavior: B,
    ladder: CapacityLadder,
    growth_threshold: f32,
    store: ChainStore<Counted<T>>,
    total: usize,
}

impl<T> FrequencyTable<T>
where
    T: Hash + Eq,
{
    /// Table hashing with `DefaultBehavior`.
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        Self::with_behavior(DefaultBehavior::default(), config)
    }
}

impl<T, B> FrequencyTable<T, B>
where
    B: Behavior<T>,
{
    pub fn with_behavior(behavior: B, config: TableConfig) -> Result<Self, TableError> {
        let (ladder, growth_threshold) = config.into_parts()?;
        let store = ChainStore::with_buckets(ladder.current())?;
        log::debug!(
            "created frequency table: {} buckets, {} ladder rungs, growth threshold {}",
            ladder.current(),
            ladder.as_slice().len(),
            growth_threshold
        );
        Ok(Self {
            behavior,
            ladder,
            growth_threshold,
            store,
            total: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.ladder.current()
    }

    #[inline]
    pub fn distinct_keys(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn total_occurrences(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Distinct keys per bucket.
    pub fn load_factor(&self) -> f32 {
        self.store.len() as f32 / self.capacity() as f32
    }

    pub fn growth_threshold(&self) -> f32 {
        self.growth_threshold
    }

    /// Every capacity the table may take, smallest first.
    pub fn ladder(&self) -> &[usize] {
        self.ladder.as_slice()
    }

    /// The behavior the table hashes, compares and releases payloads with.
    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    fn bucket_of(&self, payload: &T) -> usize {
        bucket_index(self.behavior.hash(payload), self.store.bucket_count())
    }

    /// Count one occurrence of `payload` and return its class frequency.
    ///
    /// A payload equal to a stored one only bumps that entry's frequency
    /// and is dropped; the first payload of a class stays in the table.
    /// May grow the table first. `None` is rejected with
    /// `TableError::InvalidArgument`.
    ///
    /// If growing fails with `TableError::AllocationFailure` the table is
    /// left exactly as it was, but the pending growth is retried by every
    /// later insert, so the table stops accepting inserts (duplicates
    /// included) until that allocation succeeds. Lookups keep working.
    pub fn insert(&mut self, payload: impl Into<Option<T>>) -> Result<usize, TableError> {
        let payload = payload
            .into()
            .ok_or(TableError::InvalidArgument { operation: "insert" })?;
        self.grow_if_needed()?;

        let bucket = self.bucket_of(&payload);
        let behavior = &self.behavior;
        match self
            .store
            .entry(bucket, |c| behavior.equals(&c.payload, &payload))
        {
            ChainEntry::Occupied(counted) => {
                counted.frequency += 1;
                self.total += 1;
                Ok(counted.frequency)
            }
            ChainEntry::Vacant(vacant) => {
                vacant.insert(Counted {
                    payload,
                    frequency: 1,
                });
                self.total += 1;
                log::trace!(
                    "new key in bucket {} ({} distinct)",
                    bucket,
                    self.store.len()
                );
                Ok(1)
            }
        }
    }

    // A threshold of exactly 1.0 turns growth off for good, even once the
    // load factor passes it.
    fn growth_disabled(&self) -> bool {
        self.growth_threshold == 1.0
    }

    fn grow_if_needed(&mut self) -> Result<(), TableError> {
        let Some(next) = self.ladder.peek_next() else {
            return Ok(());
        };
        let load = self.load_factor();
        if self.growth_disabled() || load <= self.growth_threshold {
            return Ok(());
        }

        let from = self.capacity();
        let behavior = &self.behavior;
        self.store
            .relink(next, |c| bucket_index(behavior.hash(&c.payload), next))?;
        self.ladder.advance();
        log::debug!(
            "grew from {} to {} buckets at {} distinct keys (load factor {:.3})",
            from,
            next,
            self.store.len(),
            load
        );
        Ok(())
    }

    /// Entry for `payload`'s class, or `Ok(None)` if it was never
    /// inserted. `None` is rejected with `TableError::InvalidArgument`.
    pub fn find<'q>(
        &self,
        payload: impl Into<Option<&'q T>>,
    ) -> Result<Option<Entry<'_, T>>, TableError>
    where
        T: 'q,
    {
        let payload = payload
            .into()
            .ok_or(TableError::InvalidArgument { operation: "find" })?;
        let bucket = self.bucket_of(payload);
        let behavior = &self.behavior;
        Ok(self
            .store
            .find(bucket, |c| behavior.equals(&c.payload, payload))
            .map(Entry::from_counted))
    }

    /// Frequency of `payload`'s class; `0` if it was never inserted.
    pub fn frequency<'q>(&self, payload: impl Into<Option<&'q T>>) -> Result<usize, TableError>
    where
        T: 'q,
    {
        Ok(self.find(payload)?.map_or(0, |e| e.frequency()))
    }

    /// All entries in bucket order, then insertion order within a bucket.
    /// The order changes whenever the table grows.
    pub fn iter(&self) -> Entries<'_, T> {
        Entries {
            inner: self.store.iter(),
        }
    }

    /// Freshly allocated copy of `iter()`; empty for an empty table.
    pub fn to_snapshot(&self) -> Result<Vec<Entry<'_, T>>, TableError> {
        let len = self.distinct_keys();
        let mut snapshot = Vec::new();
        snapshot
            .try_reserve_exact(len)
            .map_err(|_| TableError::allocation(len, "snapshot entries"))?;
        snapshot.extend(self.iter());
        Ok(snapshot)
    }

    /// Scan every bucket and summarize the chain lengths.
    pub fn metrics(&self) -> ChainMetrics {
        ChainMetrics::from_chain_lengths(self.store.chain_lengths())
    }

    /// Entries tagged with the bucket they are stored in.
    #[cfg(test)]
    pub(crate) fn placed_entries(&self) -> impl Iterator<Item = (usize, Entry<'_, T>)> + '_ {
        self.store
            .iter()
            .map(|(bucket, c)| (bucket, Entry::from_counted(c)))
    }

    #[cfg(test)]
    pub(crate) fn expected_bucket(&self, payload: &T) -> usize {
        self.bucket_of(payload)
    }
}

impl<T, B> Drop for FrequencyTable<T, B>
where
    B: Behavior<T>,
{
    fn drop(&mut self) {
        let behavior = &self.behavior;
        self.store
            .drain_chains(|mut counted| behavior.destroy(&mut counted.payload));
    }
}

impl<T, B> fmt::Debug for FrequencyTable<T, B>
where
    B: Behavior<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyTable")
            .field("capacity", &self.capacity())
            .field("distinct_keys", &self.distinct_keys())
            .field("total_occurrences", &self.total)
            .field("growth_threshold", &self.growth_threshold)
            .finish_non_exhaustive()
    }
}

impl<'a, T, B> IntoIterator for &'a FrequencyTable<T, B>
where
    B: Behavior<T>,
{
    type Item = Entry<'a, T>;
    type IntoIter = Entries<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a table's entries. See `FrequencyTable::iter`.
pub struct Entries<'a, T> {
    inner: chain_store::Iter<'a, Counted<T>>,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = Entry<'a, T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, c)| Entry::from_counted(c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}
