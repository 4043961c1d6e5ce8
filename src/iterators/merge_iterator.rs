/*
Merges any number of sorted sources into one sorted view without copying them.

The sources are arranged into a balanced binary tree of 2-way merges. Each
merge node keeps two cursors, small and big: small is always the one to report
(smallest key going forward, largest in reverse), big is the other one.

1 -> 2 -> 5 -> 7
2 -> 3 -> 4 -> 7

res = 1 -> 2 (first) -> 3 -> 4 -> 5 -> 7 (first)

When both cursors sit on the same key, the value of the input given first
wins and the other input is moved past the key. Precedence composes through
the tree: for duplicates across any number of sources, the earliest source in
the list handed to `build` wins.
 */

use std::sync::Arc;

use bytes::Bytes;

use crate::comparator::KeyComparator;
use crate::entry::ValObj;
use crate::errors::Result;
use crate::iterators::{SourceIterator, StorageIterator};
use crate::opts::IteratorOptions;
use crate::util::join_close_results;

// slot of the node built around the first and second input of a 2-way merge
const FIRST: usize = 0;
const SECOND: usize = 1;

/// Cursor over one child, caching its validity and key.
struct Node {
    valid: bool,
    // stale when !valid
    key: Bytes,
    iter: SourceIterator,
    slot: usize,
}

impl Node {
    fn new(iter: SourceIterator, slot: usize) -> Node {
        Node {
            valid: false,
            key: Bytes::new(),
            iter,
            slot,
        }
    }

    // merge and concat children are read directly, everything else through the trait object
    fn set_key(&mut self) {
        match &self.iter {
            SourceIterator::Merge(merge) => {
                self.valid = merge.small.valid;
                if self.valid {
                    self.key = merge.small.key.clone();
                }
            }
            SourceIterator::Concat(concat) => {
                self.valid = concat.valid();
                if self.valid {
                    self.key = concat.key().clone();
                }
            }
            SourceIterator::Dyn(iter) => {
                self.valid = iter.valid();
                if self.valid {
                    self.key = iter.key().clone();
                }
            }
        }
    }

    fn next(&mut self) {
        match &mut self.iter {
            SourceIterator::Merge(merge) => merge.next(),
            SourceIterator::Concat(concat) => concat.next(),
            SourceIterator::Dyn(iter) => iter.next(),
        }
        self.set_key();
    }

    fn rewind(&mut self) {
        self.iter.rewind();
        self.set_key();
    }

    fn seek(&mut self, key: &[u8]) {
        self.iter.seek(key);
        self.set_key();
    }
}

/// Two-way merge node. Owns both children and closes them on `close`.
pub struct MergeIterator {
    small: Node,
    big: Node,
    // slot of the input whose duplicates are skipped
    second: usize,
    reverse: bool,
    key_comparator: Arc<dyn KeyComparator<[u8]>>,
}

impl MergeIterator {
    /**
    Builds a merge tree over `iters`, consuming them.

    No sources gives an iterator that is never valid, a single source is
    returned as is. Otherwise the list is split in the middle and both halves
    are merged recursively, so the tree depth is ceil(log2 n).

    Every source must be sorted by `opts.key_comparator` in the direction of
    `opts.reverse`. The result must be rewound or seeked before use.
     */
    pub fn build(iters: Vec<SourceIterator>, opts: &IteratorOptions) -> SourceIterator {
        log::debug!("building merge tree over {} iterators, reverse {}", iters.len(), opts.reverse);
        Self::build_tree(iters, opts)
    }

    fn build_tree(iters: Vec<SourceIterator>, opts: &IteratorOptions) -> SourceIterator {
        let mut iters = iters;
        if iters.len() <= 1 {
            return iters.pop().unwrap_or_else(SourceIterator::empty);
        }

        let mid = iters.len() / 2;
        let right = iters.split_off(mid);
        let first = Self::build_tree(iters, opts);
        let second = Self::build_tree(right, opts);

        SourceIterator::from(Self::new(first, second, opts))
    }

    fn new(first: SourceIterator, second: SourceIterator, opts: &IteratorOptions) -> MergeIterator {
        MergeIterator {
            small: Node::new(first, FIRST),
            big: Node::new(second, SECOND),
            second: SECOND,
            reverse: opts.reverse,
            key_comparator: opts.key_comparator.clone(),
        }
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.small, &mut self.big);
    }

    // restores small/big order after small moved, skipping duplicates of the second input
    fn fix(&mut self) {
        if !self.big.valid {
            return;
        }

        while self.small.valid {
            let cmp = self.key_comparator.compare(&self.small.key, &self.big.key);

            if cmp.is_eq() {
                let second_valid = if self.small.slot == self.second {
                    self.small.next();
                    self.small.valid
                } else if self.big.slot == self.second {
                    self.big.next();
                    self.big.valid
                } else {
                    panic!(
                        "merge iterator: second input (slot {}) is held by neither node (slots {}, {})",
                        self.second, self.small.slot, self.big.slot
                    );
                };

                if !second_valid {
                    if self.small.slot == self.second && self.big.valid {
                        self.swap();
                    }
                    return;
                }
                continue;
            }

            if self.reverse {
                if cmp.is_lt() {
                    self.swap();
                }
            } else if cmp.is_gt() {
                self.swap();
            }
            return;
        }

        // small ran out, the other side takes over
        self.swap();
    }

    fn check_invariants(&self) -> bool {
        if !self.small.valid {
            return !self.big.valid;
        }
        if !self.big.valid {
            return true;
        }

        let cmp = self.key_comparator.compare(&self.small.key, &self.big.key);
        if self.reverse {
            cmp.is_ge()
        } else {
            cmp.is_le()
        }
    }
}

impl StorageIterator for MergeIterator {
    fn next(&mut self) {
        self.small.next();
        self.fix();
        debug_assert!(self.check_invariants(), "merge iterator out of order after next");
    }

    fn rewind(&mut self) {
        self.small.rewind();
        self.big.rewind();
        self.fix();
        debug_assert!(self.check_invariants(), "merge iterator out of order after rewind");
    }

    fn seek(&mut self, key: &[u8]) {
        self.small.seek(key);
        self.big.seek(key);
        self.fix();
        debug_assert!(self.check_invariants(), "merge iterator out of order after seek");
    }

    fn key(&self) -> &Bytes {
        debug_assert!(self.small.valid, "key called on exhausted merge iterator");
        &self.small.key
    }

    fn value(&self) -> ValObj {
        self.small.iter.value()
    }

    fn valid(&self) -> bool {
        self.small.valid
    }

    // both children are closed even if the first one fails
    fn close(&mut self) -> Result<()> {
        let (first, second) = if self.small.slot == FIRST {
            (&mut self.small, &mut self.big)
        } else {
            (&mut self.big, &mut self.small)
        };
        let first_res = first.iter.close();
        let second_res = second.iter.close();

        join_close_results([first_res, second_res], "MergeIterator")
    }
}
