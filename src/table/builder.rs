use std::sync::Arc;

use crate::comparator::KeyComparator;
use crate::entry::Entry;
use crate::errors::Error::IllegalState;
use crate::errors::Result;
use crate::opts::IteratorOptions;
use crate::table::Table;

pub struct TableBuilder {
    id: usize,
    entries: Vec<Entry>,
    key_comparator: Arc<dyn KeyComparator<[u8]>>,
}

impl TableBuilder {
    pub fn new(id: usize, opts: &IteratorOptions) -> TableBuilder {
        TableBuilder {
            id,
            entries: Vec::new(),
            key_comparator: opts.key_comparator.clone(),
        }
    }

    // entries must come in strictly increasing key order
    pub fn add(&mut self, entry: Entry) -> Result<()> {
        if let Some(last) = self.entries.last() {
            if !self.key_comparator.compare(&last.key, &entry.key).is_lt() {
                return Err(IllegalState(format!(
                    "table {}: key {:?} is not greater than previous key {:?}",
                    self.id, entry.key, last.key
                )));
            }
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn finish(self) -> Table {
        log::trace!("table {} built with {} entries", self.id, self.entries.len());

        Table {
            entries: self.entries,
            key_comparator: self.key_comparator,
        }
    }

    /// Builds a table from entries in any order. Later duplicates are dropped.
    pub fn build_from_entries(id: usize, entries: Vec<Entry>, opts: &IteratorOptions) -> Table {
        let mut entries = entries;
        let cmp = opts.key_comparator.clone();
        // stable, so the first of equal keys stays first
        entries.sort_by(|a, b| cmp.compare(&a.key, &b.key));
        entries.dedup_by(|later, earlier| cmp.compare(&later.key, &earlier.key).is_eq());
        log::trace!("table {} built from {} entries", id, entries.len());

        Table {
            entries,
            key_comparator: cmp,
        }
    }
}
