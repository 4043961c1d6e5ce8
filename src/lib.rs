pub mod comparator;
pub mod entry;
pub mod errors;
pub mod iterators;
pub mod logger;
pub mod opts;
pub mod table;
mod util;

extern crate simplelog;

pub use errors::{Error, Result};
pub use iterators::{SourceIterator, StorageIterator};
pub use iterators::merge_iterator::MergeIterator;
pub use opts::IteratorOptions;
