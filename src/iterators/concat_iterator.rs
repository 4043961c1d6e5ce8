use std::sync::Arc;

use bytes::Bytes;

use crate::comparator::KeyComparator;
use crate::entry::ValObj;
use crate::errors::Result;
use crate::iterators::StorageIterator;
use crate::iterators::table_iterator::TableIterator;
use crate::opts::IteratorOptions;
use crate::table::Table;
use crate::util::join_close_results;

/*
Iterates over tables whose key ranges do not overlap, e.g. one level of sstables.
Tables are given in ascending key order regardless of direction. Empty
tables are dropped up front, their bounds would break the binary search in seek.

Only one table iterator is positioned at a time. iterator_pos is None when
the iterator walked off either end.
 */
pub struct ConcatIterator {
    iterators: Vec<TableIterator>,
    iterator_pos: Option<usize>,
    reverse: bool,
    key_comparator: Arc<dyn KeyComparator<[u8]>>,
}

impl ConcatIterator {
    pub fn new(tables: Vec<Arc<Table>>, opts: &IteratorOptions) -> Self {
        let iterators = tables.into_iter()
            .filter(|t| !t.is_empty())
            .map(|t| TableIterator::new(t, opts.reverse))
            .collect();

        ConcatIterator {
            iterators,
            iterator_pos: None,
            reverse: opts.reverse,
            key_comparator: opts.key_comparator.clone(),
        }
    }

    fn current(&self) -> Option<&TableIterator> {
        self.iterator_pos.map(|pos| &self.iterators[pos])
    }

    fn set_pos(&mut self, pos: Option<usize>) {
        self.iterator_pos = pos.filter(|p| *p < self.iterators.len());
    }

    // neighbour in the configured direction
    fn step(&self, pos: usize) -> Option<usize> {
        if self.reverse {
            pos.checked_sub(1)
        } else {
            Some(pos + 1)
        }
    }

    // moves to pos and rewinds it, walking further while tables are exhausted
    fn rewind_from(&mut self, pos: Option<usize>) {
        self.set_pos(pos);
        while let Some(pos) = self.iterator_pos {
            let iter = &mut self.iterators[pos];
            iter.rewind();
            if iter.valid() {
                return;
            }
            let nxt = self.step(pos);
            self.set_pos(nxt);
        }
    }
}

impl StorageIterator for ConcatIterator {
    fn next(&mut self) {
        let pos = match self.iterator_pos {
            Some(pos) => pos,
            None => return,
        };

        let iter = &mut self.iterators[pos];
        iter.next();
        if iter.valid() {
            return;
        }

        let nxt = self.step(pos);
        self.rewind_from(nxt);
    }

    fn rewind(&mut self) {
        if self.iterators.is_empty() {
            return;
        }
        let first = if self.reverse {
            self.iterators.len() - 1
        } else {
            0
        };
        self.rewind_from(Some(first));
    }

    fn seek(&mut self, key: &[u8]) {
        let cmp = self.key_comparator.clone();

        let pos = if !self.reverse {
            // first table that may contain a key >= target
            let idx = self.iterators.partition_point(|it| {
                cmp.compare(&it.table().biggest(), key).is_lt()
            });
            Some(idx)
        } else {
            // last table that may contain a key <= target
            let idx = self.iterators.partition_point(|it| {
                cmp.compare(&it.table().smallest(), key).is_le()
            });
            idx.checked_sub(1)
        };

        self.set_pos(pos);
        let pos = match self.iterator_pos {
            Some(pos) => pos,
            None => return,
        };

        // non-empty table whose bound admits the key, so seek lands on an entry
        self.iterators[pos].seek(key);
    }

    fn key(&self) -> &Bytes {
        match self.current() {
            Some(iter) => iter.key(),
            None => panic!("key called on exhausted concat iterator"),
        }
    }

    fn value(&self) -> ValObj {
        match self.current() {
            Some(iter) => iter.value(),
            None => panic!("value called on exhausted concat iterator"),
        }
    }

    fn valid(&self) -> bool {
        self.current().map(|it| it.valid()).unwrap_or(false)
    }

    fn close(&mut self) -> Result<()> {
        let results: Vec<Result<()>> = self.iterators.iter_mut()
            .map(|it| it.close())
            .collect();
        join_close_results(results, "ConcatIterator")
    }
}
