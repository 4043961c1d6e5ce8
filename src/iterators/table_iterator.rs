use std::sync::Arc;

use bytes::Bytes;

use crate::entry::{Entry, ValObj};
use crate::errors::Result;
use crate::iterators::{SourceIterator, StorageIterator};
use crate::table::Table;

/*
position is the index of the current entry.
forward: valid while position < len
reverse: valid while position >= 0, so it is signed
 */
pub struct TableIterator {
    table: Arc<Table>,
    position: isize,
    reverse: bool,
}

impl TableIterator {
    pub fn new(table: Arc<Table>, reverse: bool) -> Self {
        // not positioned until rewind or seek
        let position = if reverse { -1 } else { table.len() as isize };
        TableIterator {
            table,
            position,
            reverse,
        }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    fn current(&self) -> &Entry {
        // only called when valid
        &self.table.entries[self.position as usize]
    }
}

impl StorageIterator for TableIterator {
    fn next(&mut self) {
        if !self.valid() {
            return;
        }
        if self.reverse {
            self.position -= 1;
        } else {
            self.position += 1;
        }
    }

    fn rewind(&mut self) {
        self.position = if self.reverse {
            self.table.len() as isize - 1
        } else {
            0
        };
    }

    fn seek(&mut self, key: &[u8]) {
        self.position = if self.reverse {
            // last key <= target, -1 if every key is bigger
            self.table.upper_bound(key) as isize - 1
        } else {
            self.table.lower_bound(key) as isize
        };
    }

    fn key(&self) -> &Bytes {
        &self.current().key
    }

    fn value(&self) -> ValObj {
        self.current().val_obj.clone()
    }

    fn valid(&self) -> bool {
        self.position >= 0 && (self.position as usize) < self.table.len()
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl From<TableIterator> for SourceIterator {
    fn from(value: TableIterator) -> Self {
        SourceIterator::boxed(value)
    }
}
