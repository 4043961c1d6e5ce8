#![allow(dead_code)]

use std::sync::Arc;
use bytes::{Bytes, BytesMut};
use rand::Rng;
use mergedb::entry::{Entry, META_ADD};
use mergedb::iterators::concat_iterator::ConcatIterator;
use mergedb::iterators::table_iterator::TableIterator;
use mergedb::opts::IteratorOptions;
use mergedb::table::Table;
use mergedb::table::builder::TableBuilder;
use mergedb::{SourceIterator, StorageIterator};

pub fn gen_kv_pair(key: u64, value_size: usize) -> (Bytes, Bytes) {
    let key = Bytes::from(format!("vsz={:05}-k={:010}", value_size, key));

    let mut value = BytesMut::with_capacity(value_size);
    value.resize(value_size, 0);

    (key, value.freeze())
}

/// `table_nums` overlapping tables, each holding a random subset of `0..key_nums`.
pub fn rand_tables(table_nums: usize, key_nums: u64, value_size: usize, opts: &IteratorOptions) -> Vec<Arc<Table>> {
    let mut rng = rand::thread_rng();

    (0..table_nums).map(|id| {
        let mut builder = TableBuilder::new(id, opts);
        for key in 0..key_nums {
            if rng.gen_bool(0.5) {
                let (key, value) = gen_kv_pair(key, value_size);
                builder.add(Entry::new(key, value, META_ADD)).unwrap();
            }
        }
        Arc::new(builder.finish())
    }).collect()
}

/// `table_nums` tables splitting `0..key_nums` into disjoint consecutive ranges.
pub fn level_tables(table_nums: usize, key_nums: u64, value_size: usize, opts: &IteratorOptions) -> Vec<Arc<Table>> {
    let per_table = key_nums / table_nums as u64;

    (0..table_nums).map(|id| {
        let mut builder = TableBuilder::new(id, opts);
        let start = id as u64 * per_table;
        for key in start..start + per_table {
            let (key, value) = gen_kv_pair(key, value_size);
            builder.add(Entry::new(key, value, META_ADD)).unwrap();
        }
        Arc::new(builder.finish())
    }).collect()
}

pub fn table_sources(tables: &[Arc<Table>], opts: &IteratorOptions) -> Vec<SourceIterator> {
    tables.iter()
        .map(|t| TableIterator::new(t.clone(), opts.reverse).into())
        .collect()
}

pub fn level_source(tables: &[Arc<Table>], opts: &IteratorOptions) -> SourceIterator {
    ConcatIterator::new(tables.to_vec(), opts).into()
}

pub fn scan<I: StorageIterator>(iter: &mut I) -> usize {
    let mut count = 0;
    iter.rewind();
    while iter.valid() {
        count += iter.value().value.len();
        iter.next();
    }
    count
}
