use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;

use crate::entry::{META_ADD, ValObj};
use crate::errors::{Error, Result};
use crate::iterators::StorageIterator;

/*
Source backed by a vector of (key, value) pairs in ascending key order.
Reverse mode walks it backwards. Keys are compared bytewise.
 */
#[derive(Clone)]
pub struct MockIterator {
    pub data: Vec<(Bytes, Bytes)>,
    pub reverse: bool,
    pub fail_close: Option<String>,
    pub closed: Arc<AtomicUsize>,
    // index into data, data.len() when invalid
    index: usize,
}

impl MockIterator {
    pub fn new(data: Vec<(Bytes, Bytes)>) -> Self {
        Self {
            index: data.len(),
            data,
            reverse: false,
            fail_close: None,
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Single-letter keys, value is the key followed by the tag, e.g. "bA".
    pub fn from_keys(keys: &str, tag: &str) -> Self {
        let mut data: Vec<(Bytes, Bytes)> = keys.chars()
            .map(|c| (Bytes::from(c.to_string()), Bytes::from(format!("{}{}", c, tag))))
            .collect();
        data.sort();
        Self::new(data)
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn failing_close(mut self, msg: &str) -> Self {
        self.fail_close = Some(msg.to_string());
        self
    }

    pub fn with_counter(mut self, closed: Arc<AtomicUsize>) -> Self {
        self.closed = closed;
        self
    }
}

impl StorageIterator for MockIterator {
    fn next(&mut self) {
        if !self.valid() {
            return;
        }
        if self.reverse {
            // wraps to data.len() when stepping before the first entry
            self.index = if self.index == 0 { self.data.len() } else { self.index - 1 };
        } else {
            self.index += 1;
        }
    }

    fn rewind(&mut self) {
        self.index = if self.reverse {
            if self.data.is_empty() { 0 } else { self.data.len() - 1 }
        } else {
            0
        };
    }

    fn seek(&mut self, key: &[u8]) {
        if self.reverse {
            let idx = self.data.partition_point(|(k, _)| k.as_ref() <= key);
            self.index = if idx == 0 { self.data.len() } else { idx - 1 };
        } else {
            self.index = self.data.partition_point(|(k, _)| k.as_ref() < key);
        }
    }

    fn key(&self) -> &Bytes {
        &self.data[self.index].0
    }

    fn value(&self) -> ValObj {
        ValObj::new(self.data[self.index].1.clone(), META_ADD)
    }

    fn valid(&self) -> bool {
        self.index < self.data.len()
    }

    fn close(&mut self) -> Result<()> {
        let prev = self.closed.fetch_add(1, Ordering::SeqCst);
        assert_eq!(prev, 0, "iterator closed twice");

        match &self.fail_close {
            Some(msg) => Err(Error::from(io::Error::new(io::ErrorKind::Other, msg.clone()))),
            None => Ok(()),
        }
    }
}

/// Full traversal from the current position as (key, value) strings.
pub fn collect<I: StorageIterator + ?Sized>(iter: &mut I) -> Vec<(String, String)> {
    let mut res = Vec::new();
    while iter.valid() {
        res.push((
            String::from_utf8_lossy(iter.key()).to_string(),
            String::from_utf8_lossy(&iter.value().value).to_string(),
        ));
        iter.next();
    }
    res
}

pub fn check_iter_result<I: StorageIterator + ?Sized>(iter: &mut I, expected: &[(&str, &str)]) {
    let expected: Vec<(String, String)> = expected.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(collect(iter), expected);
}
