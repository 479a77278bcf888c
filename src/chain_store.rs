//! ChainStore: structural layer holding bucket heads over an arena of
//! singly linked chain nodes.
//!
//! Nodes live in a `SlotMap` and link to each other by arena key, so
//! relinking during growth only rewrites `next` fields and the head
//! array; values never move and nothing is reallocated per node. The
//! store knows nothing about hashing or counting: callers pass the bucket
//! index and a match predicate.

use crate::error::TableError;
use crate::reentrancy::DebugReentrancy;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena index of a chain node.
    pub(crate) struct NodeKey;
}

#[derive(Debug)]
struct Node<V> {
    value: V,
    next: Option<NodeKey>,
}

pub(crate) struct ChainStore<V> {
    heads: Vec<Option<NodeKey>>,
    nodes: SlotMap<NodeKey, Node<V>>,
    reentrancy: DebugReentrancy,
}

/// Result of scanning one chain for a matching value.
pub(crate) enum ChainEntry<'a, V> {
    Occupied(&'a mut V),
    Vacant(VacantChain<'a, V>),
}

/// A chain scanned to its end without a match; remembers the tail so the
/// new node is appended without a second walk.
pub(crate) struct VacantChain<'a, V> {
    store: &'a mut ChainStore<V>,
    bucket: usize,
    tail: Option<NodeKey>,
}

impl<'a, V> VacantChain<'a, V> {
    pub(crate) fn insert(self, value: V) -> &'a mut V {
        let store = self.store;
        let key = store.nodes.insert(Node { value, next: None });
        match self.tail {
            Some(tail) => store.nodes[tail].next = Some(key),
            None => store.heads[self.bucket] = Some(key),
        }
        &mut store.nodes[key].value
    }
}

fn allocate_heads(capacity: usize) -> Result<Vec<Option<NodeKey>>, TableError> {
    let mut heads = Vec::new();
    heads
        .try_reserve_exact(capacity)
        .map_err(|_| TableError::allocation(capacity, "buckets"))?;
    heads.resize(capacity, None);
    Ok(heads)
}

impl<V> ChainStore<V> {
    pub(crate) fn with_buckets(capacity: usize) -> Result<Self, TableError> {
        Ok(Self {
            heads: allocate_heads(capacity)?,
            nodes: SlotMap::with_key(),
            reentrancy: DebugReentrancy::new(),
        })
    }

    #[inline]
    pub(crate) fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    /// Number of nodes across all chains.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    fn chain(&self, bucket: usize) -> Chain<'_, V> {
        Chain {
            nodes: &self.nodes,
            cursor: self.heads[bucket],
        }
    }

    /// First value in `bucket` accepted by `matches`.
    pub(crate) fn find<F>(&self, bucket: usize, mut matches: F) -> Option<&V>
    where
        F: FnMut(&V) -> bool,
    {
        let _g = self.reentrancy.enter("find");
        self.chain(bucket).find(|v| matches(v))
    }

    /// Scan `bucket` front to back. Stops at the first value accepted by
    /// `matches`; otherwise hands back the chain's tail for appending.
    pub(crate) fn entry<F>(&mut self, bucket: usize, mut matches: F) -> ChainEntry<'_, V>
    where
        F: FnMut(&V) -> bool,
    {
        let (hit, tail) = {
            let _g = self.reentrancy.enter("entry");
            let mut tail = None;
            let mut hit = None;
            let mut cursor = self.heads[bucket];
            while let Some(key) = cursor {
                let node = &self.nodes[key];
                if matches(&node.value) {
                    hit = Some(key);
                    break;
                }
                tail = Some(key);
                cursor = node.next;
            }
            (hit, tail)
        };
        match hit {
            Some(key) => ChainEntry::Occupied(&mut self.nodes[key].value),
            None => ChainEntry::Vacant(VacantChain {
                store: self,
                bucket,
                tail,
            }),
        }
    }

    /// Move every node into a fresh array of `capacity` buckets.
    ///
    /// `bucket_of` is called once per node, in bucket-then-chain order,
    /// before any link is rewritten; nodes are appended to their new
    /// chains in that same order. If an allocation fails the store is left
    /// untouched.
    pub(crate) fn relink<F>(&mut self, capacity: usize, mut bucket_of: F) -> Result<(), TableError>
    where
        F: FnMut(&V) -> usize,
    {
        let mut heads = allocate_heads(capacity)?;
        let mut tails = allocate_heads(capacity)?;
        let mut moves: Vec<(NodeKey, usize)> = Vec::new();
        moves
            .try_reserve_exact(self.nodes.len())
            .map_err(|_| TableError::allocation(self.nodes.len(), "relink slots"))?;

        {
            let _g = self.reentrancy.enter("relink");
            for &head in &self.heads {
                let mut cursor = head;
                while let Some(key) = cursor {
                    let node = &self.nodes[key];
                    let bucket = bucket_of(&node.value);
                    debug_assert!(bucket < capacity, "bucket {} out of {}", bucket, capacity);
                    moves.push((key, bucket));
                    cursor = node.next;
                }
            }
        }

        for (key, bucket) in moves {
            self.nodes[key].next = None;
            match tails[bucket] {
                Some(tail) => self.nodes[tail].next = Some(key),
                None => heads[bucket] = Some(key),
            }
            tails[bucket] = Some(key);
        }
        self.heads = heads;
        Ok(())
    }

    /// Node count of every bucket, in bucket order.
    pub(crate) fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.heads.len()).map(move |bucket| self.chain(bucket).count())
    }

    /// All values in bucket order, then chain order, tagged with their
    /// bucket index.
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            store: self,
            bucket: 0,
            chain: Chain {
                nodes: &self.nodes,
                cursor: self.heads.first().copied().flatten(),
            },
            remaining: self.nodes.len(),
        }
    }

    /// Unlink and hand every value to `f` in bucket-then-chain order,
    /// leaving the store with no buckets.
    pub(crate) fn drain_chains<F>(&mut self, mut f: F)
    where
        F: FnMut(V),
    {
        let heads = core::mem::take(&mut self.heads);
        for head in heads {
            let mut cursor = head;
            while let Some(key) = cursor {
                let Some(node) = self.nodes.remove(key) else {
                    break;
                };
                cursor = node.next;
                f(node.value);
            }
        }
        debug_assert!(self.nodes.is_empty());
    }
}

/// Values along one chain.
struct Chain<'a, V> {
    nodes: &'a SlotMap<NodeKey, Node<V>>,
    cursor: Option<NodeKey>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.value)
    }
}

/// Iterator over `(bucket, &value)` in bucket order.
pub(crate) struct Iter<'a, V> {
    store: &'a ChainStore<V>,
    bucket: usize,
    chain: Chain<'a, V>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (usize, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some(value) = self.chain.next() {
                self.remaining -= 1;
                return Some((self.bucket, value));
            }
            self.bucket += 1;
            let head = *self.store.heads.get(self.bucket)?;
            self.chain.cursor = head;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
