use bytes::{BufMut, Bytes, BytesMut};

// if meta is 0, then it is invalid record or absent.
pub const META_DELETE: u8 = 1 << 0;
pub const META_ADD: u8 = 1 << 1;

// big endian `u64::MAX - version` appended to the user key
pub const VERSION_SIZE: usize = 8;

pub type Key = Bytes;

#[derive(PartialEq, Eq, Debug, Default, Clone)]
pub struct Entry {
    pub key: Key,
    pub val_obj: ValObj,
}

/// Value stored next to a key. Merge iterators hand it through untouched.
#[derive(PartialEq, Eq, Debug, Default, Clone)]
pub struct ValObj {
    pub value: Bytes,
    pub meta: u8,
    pub user_meta: u8,
    pub expires_at: u64,
    pub version: u64,
}

impl ValObj {
    pub fn new(value: Bytes, meta: u8) -> ValObj {
        ValObj {
            value,
            meta,
            ..Default::default()
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.meta & META_DELETE != 0
    }
}

impl Entry {
    pub fn new(key: Key, value: Bytes, meta: u8) -> Entry {
        Entry {
            key,
            val_obj: ValObj::new(value, meta),
        }
    }
}

pub fn key_with_version(key: &[u8], version: u64) -> Bytes {
    let mut buf = BytesMut::with_capacity(key.len() + VERSION_SIZE);
    buf.extend_from_slice(key);
    buf.put_u64(u64::MAX - version);
    buf.freeze()
}

/// User key without the version suffix.
pub fn parse_key(key: &[u8]) -> &[u8] {
    if key.len() < VERSION_SIZE {
        return key;
    }
    &key[..key.len() - VERSION_SIZE]
}

/// Version stored in the suffix, 0 for unversioned keys.
pub fn parse_version(key: &[u8]) -> u64 {
    if key.len() < VERSION_SIZE {
        return 0;
    }
    let mut suffix = [0u8; VERSION_SIZE];
    suffix.copy_from_slice(&key[key.len() - VERSION_SIZE..]);
    u64::MAX - u64::from_be_bytes(suffix)
}
