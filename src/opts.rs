use std::sync::Arc;

use crate::comparator::{BytewiseComparator, KeyComparator};

#[derive(Clone)]
pub struct IteratorOptions {
    // descending order: rewind goes to the last key, seek finds largest key <= target
    pub reverse: bool,
    // must be the comparator the sources were sorted with
    pub key_comparator: Arc<dyn KeyComparator<[u8]>>,
}

impl Default for IteratorOptions {
    fn default() -> Self {
        IteratorOptions {
            reverse: false,
            key_comparator: Arc::new(BytewiseComparator {}),
        }
    }
}
