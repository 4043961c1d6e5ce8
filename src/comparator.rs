use std::cmp::Ordering;

use crate::entry::{parse_key, VERSION_SIZE};

/// Total order over encoded keys. Every source in a merge tree must be sorted
/// by the same comparator the tree is built with.
pub trait KeyComparator<T: ?Sized>: Send + Sync {
    fn compare(&self, compare: &T, another: &T) -> Ordering;
}

pub struct BytewiseComparator {}

impl KeyComparator<[u8]> for BytewiseComparator {
    fn compare(&self, compare: &[u8], another: &[u8]) -> Ordering {
        compare.cmp(another)
    }
}

/**
Keys with a version suffix, see `entry::key_with_version`.

User key ascending first, then the suffix bytes ascending. The suffix stores
`u64::MAX - version`, so for one user key the newest version comes first.
A key shorter than the suffix is a user key with an empty suffix, so it sorts
before every versioned key with the same user key.
 */
pub struct VersionedKeyComparator {}

impl KeyComparator<[u8]> for VersionedKeyComparator {
    fn compare(&self, compare: &[u8], another: &[u8]) -> Ordering {
        let compare_key = parse_key(compare);
        let another_key = parse_key(another);

        compare_key.cmp(another_key)
            .then_with(|| version_suffix(compare).cmp(version_suffix(another)))
    }
}

fn version_suffix(key: &[u8]) -> &[u8] {
    if key.len() < VERSION_SIZE {
        return &[];
    }
    &key[key.len() - VERSION_SIZE..]
}

pub struct BytesI32Comparator {}

impl KeyComparator<[u8]> for BytesI32Comparator {
    fn compare(&self, compare: &[u8], another: &[u8]) -> Ordering {
        let compare_res: Result<[u8; 4], _> = compare.try_into();
        let another_res: Result<[u8; 4], _> = another.try_into();

        match (compare_res, another_res) {
            (Err(_), Err(_)) => Ordering::Equal,
            (Err(_), Ok(_)) => Ordering::Less,
            (Ok(_), Err(_)) => Ordering::Greater,
            (Ok(c), Ok(a)) => i32::from_be_bytes(c).cmp(&i32::from_be_bytes(a)),
        }
    }
}
