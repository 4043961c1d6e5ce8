use bytes::Bytes;

use crate::entry::ValObj;
use crate::errors::Result;
use crate::iterators::concat_iterator::ConcatIterator;
use crate::iterators::merge_iterator::MergeIterator;

pub mod concat_iterator;
pub mod merge_iterator;
pub mod table_iterator;

#[cfg(test)]
pub(crate) mod test_util;

/**
Positioned traversal over a sorted key/value source.

Direction is fixed when the iterator is created. `key` and `value` may only be
called while `valid` is true. `close` is called exactly once, after which the
iterator must not be used.

key returns &Bytes; clone it to keep the key across moves.
 */
pub trait StorageIterator {
    fn next(&mut self);
    fn rewind(&mut self);
    // forward: first key >= key, reverse: first key <= key
    fn seek(&mut self, key: &[u8]);
    fn key(&self) -> &Bytes;
    fn value(&self) -> ValObj;
    fn valid(&self) -> bool;
    fn close(&mut self) -> Result<()>;
}

/// An owned iterator that can be placed into a merge tree.
///
/// Merge and concat iterators keep their concrete type so a merge node can
/// peek at them without going through the trait object. `Dyn` covers every
/// other source, and any iterator forced onto the generic path.
pub enum SourceIterator {
    Merge(Box<MergeIterator>),
    Concat(Box<ConcatIterator>),
    Dyn(Box<dyn StorageIterator>),
}

impl SourceIterator {
    pub fn boxed<I: StorageIterator + 'static>(iter: I) -> SourceIterator {
        SourceIterator::Dyn(Box::new(iter))
    }

    pub fn empty() -> SourceIterator {
        SourceIterator::boxed(EmptyIterator {})
    }
}

impl From<MergeIterator> for SourceIterator {
    fn from(value: MergeIterator) -> Self {
        SourceIterator::Merge(Box::new(value))
    }
}

impl From<ConcatIterator> for SourceIterator {
    fn from(value: ConcatIterator) -> Self {
        SourceIterator::Concat(Box::new(value))
    }
}

impl StorageIterator for SourceIterator {
    fn next(&mut self) {
        match self {
            SourceIterator::Merge(iter) => iter.next(),
            SourceIterator::Concat(iter) => iter.next(),
            SourceIterator::Dyn(iter) => iter.next(),
        }
    }

    fn rewind(&mut self) {
        match self {
            SourceIterator::Merge(iter) => iter.rewind(),
            SourceIterator::Concat(iter) => iter.rewind(),
            SourceIterator::Dyn(iter) => iter.rewind(),
        }
    }

    fn seek(&mut self, key: &[u8]) {
        match self {
            SourceIterator::Merge(iter) => iter.seek(key),
            SourceIterator::Concat(iter) => iter.seek(key),
            SourceIterator::Dyn(iter) => iter.seek(key),
        }
    }

    fn key(&self) -> &Bytes {
        match self {
            SourceIterator::Merge(iter) => iter.key(),
            SourceIterator::Concat(iter) => iter.key(),
            SourceIterator::Dyn(iter) => iter.key(),
        }
    }

    fn value(&self) -> ValObj {
        match self {
            SourceIterator::Merge(iter) => iter.value(),
            SourceIterator::Concat(iter) => iter.value(),
            SourceIterator::Dyn(iter) => iter.value(),
        }
    }

    fn valid(&self) -> bool {
        match self {
            SourceIterator::Merge(iter) => iter.valid(),
            SourceIterator::Concat(iter) => iter.valid(),
            SourceIterator::Dyn(iter) => iter.valid(),
        }
    }

    fn close(&mut self) -> Result<()> {
        match self {
            SourceIterator::Merge(iter) => iter.close(),
            SourceIterator::Concat(iter) => iter.close(),
            SourceIterator::Dyn(iter) => iter.close(),
        }
    }
}

/// Stands in for a merge over zero sources.
pub struct EmptyIterator {}

impl StorageIterator for EmptyIterator {
    fn next(&mut self) {}

    fn rewind(&mut self) {}

    fn seek(&mut self, _key: &[u8]) {}

    fn key(&self) -> &Bytes {
        panic!("key called on empty iterator")
    }

    fn value(&self) -> ValObj {
        panic!("value called on empty iterator")
    }

    fn valid(&self) -> bool {
        false
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
