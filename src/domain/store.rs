//! Bounded, newest-first event store.
//!
//! Holds at most `capacity` events; inserting beyond capacity evicts
//! from the tail (oldest). Events are shared as `Arc` so read accessors
//! and fan-out subscribers never copy payloads.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::domain::SeismicEvent;

/// Default working-set size, matching the upstream feed's page size.
pub const DEFAULT_CAPACITY: usize = 100;

/// Capacity-limited, newest-first collection of seismic events.
///
/// Invariants:
/// - `len() <= capacity()` at all times
/// - event ids are unique within the store
/// - iteration order is newest-first; equal timestamps keep insertion order
#[derive(Debug)]
pub struct BoundedEventStore {
    /// Newest-first order.
    order: VecDeque<Arc<SeismicEvent>>,

    /// Id index for O(1) lookup.
    index: HashMap<String, Arc<SeismicEvent>>,

    capacity: usize,
}

impl BoundedEventStore {
    /// Creates a store with the given capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            order: VecDeque::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Inserts an event at the front, evicting from the back beyond
    /// capacity. A duplicate id replaces the previous occurrence.
    pub fn prepend(&mut self, event: Arc<SeismicEvent>) {
        if self.index.contains_key(&event.id) {
            self.order.retain(|e| e.id != event.id);
        }
        self.index.insert(event.id.clone(), Arc::clone(&event));
        self.order.push_front(event);

        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_back() {
                self.index.remove(&evicted.id);
            }
        }
    }

    /// Clears and bulk-loads `events` (given newest-first) without
    /// changing capacity. Input beyond capacity is truncated.
    pub fn replace_all(&mut self, events: Vec<Arc<SeismicEvent>>) {
        self.order.clear();
        self.index.clear();
        for event in events.into_iter().take(self.capacity) {
            // Bulk input may repeat ids; first (newest) occurrence wins.
            if self.index.contains_key(&event.id) {
                continue;
            }
            self.index.insert(event.id.clone(), Arc::clone(&event));
            self.order.push_back(event);
        }
    }

    /// Looks up an event by id.
    pub fn find(&self, id: &str) -> Option<Arc<SeismicEvent>> {
        self.index.get(id).cloned()
    }

    /// Snapshot of the current content, newest-first.
    pub fn snapshot(&self) -> Vec<Arc<SeismicEvent>> {
        self.order.iter().cloned().collect()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Fixed capacity of this store.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BoundedEventStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
