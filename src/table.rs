use std::sync::Arc;

use bytes::Bytes;

use crate::comparator::KeyComparator;
use crate::entry::Entry;

pub mod builder;

/**
Immutable sorted run of entries kept in memory.

Keys are strictly increasing under `key_comparator`; the builder refuses
anything else. Shared between iterators through `Arc<Table>`.
 */
pub struct Table {
    pub(crate) entries: Vec<Entry>,
    pub(crate) key_comparator: Arc<dyn KeyComparator<[u8]>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // empty Bytes for an empty table
    pub fn smallest(&self) -> Bytes {
        self.entries.first()
            .map(|e| e.key.clone())
            .unwrap_or_default()
    }

    pub fn biggest(&self) -> Bytes {
        self.entries.last()
            .map(|e| e.key.clone())
            .unwrap_or_default()
    }

    // first index with key >= target, len() if none
    pub(crate) fn lower_bound(&self, key: &[u8]) -> usize {
        self.entries.partition_point(|e| {
            self.key_comparator.compare(&e.key, key).is_lt()
        })
    }

    // first index with key > target, len() if none
    pub(crate) fn upper_bound(&self, key: &[u8]) -> usize {
        self.entries.partition_point(|e| {
            self.key_comparator.compare(&e.key, key).is_le()
        })
    }
}
