//! Collision-chaining hash index over document keys.
//!
//! Maps a document id to its slot in the collection arena. Each bucket holds
//! a singly linked chain of entries; new entries are prepended, so chain
//! order is most-recent-first between rehashes. Collisions are resolved by
//! exact-key comparison, never surfaced to the caller.
//!
//! The bucket count and the load factor that triggers a rehash are explicit
//! policy: when an insert would push `entries / buckets` past the threshold,
//! the bucket count doubles and every entry is redistributed.

use log::debug;

/// Default bucket count for a new index.
pub const DEFAULT_BUCKETS: usize = 16;

/// Default entries-per-bucket load factor that triggers a rehash.
pub const DEFAULT_MAX_LOAD: f64 = 4.0;

/// djb2 digest of a key: `h = h * 33 + byte` from a 5381 seed, wrapping.
///
/// Deterministic, fast, adequate distribution over short string keys. Not
/// cryptographic.
pub fn hash_key(key: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in key.bytes() {
        h = h.wrapping_mul(33).wrapping_add(b as u64);
    }
    h
}

struct IndexEntry {
    key: String,
    hash: u64,
    slot: usize,
    next: Option<Box<IndexEntry>>,
}

/// Bucket-and-chain index mapping keys to arena slots.
///
/// Entries hold a slot number, never the document itself; the collection
/// arena is the single owner.
pub struct HashIndex {
    buckets: Vec<Option<Box<IndexEntry>>>,
    len: usize,
    max_load: f64,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::with_policy(DEFAULT_BUCKETS, DEFAULT_MAX_LOAD)
    }

    /// Index with an explicit initial bucket count and rehash threshold.
    pub fn with_policy(buckets: usize, max_load: f64) -> Self {
        assert!(buckets > 0, "bucket count must be nonzero");
        assert!(max_load > 0.0, "max load factor must be positive");
        let mut heads = Vec::new();
        heads.resize_with(buckets, || None);
        Self {
            buckets: heads,
            len: 0,
            max_load,
        }
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count; grows by doubling on rehash.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Register `key` at `slot`, prepending to the bucket chain.
    ///
    /// Runs a rehash first if this insert would exceed the load factor.
    /// Keys are expected to be unique; a re-registered key shadows the older
    /// entry until one of them is removed.
    pub fn insert(&mut self, key: &str, hash: u64, slot: usize) {
        if (self.len + 1) as f64 / self.buckets.len() as f64 > self.max_load {
            self.rehash(self.buckets.len() * 2);
        }
        let bucket = self.bucket_of(hash);
        let entry = Box::new(IndexEntry {
            key: key.to_string(),
            hash,
            slot,
            next: self.buckets[bucket].take(),
        });
        self.buckets[bucket] = Some(entry);
        self.len += 1;
    }

    /// Slot registered for `key`.
    ///
    /// Walks the chain comparing full keys, not hashes alone, so colliding
    /// keys never resolve to each other's slot.
    pub fn lookup(&self, key: &str) -> Option<usize> {
        let bucket = self.bucket_of(hash_key(key));
        let mut cursor = self.buckets[bucket].as_deref();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(entry.slot);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Unlink the entry for `key`, returning its slot.
    pub fn remove(&mut self, key: &str) -> Option<usize> {
        let bucket = self.bucket_of(hash_key(key));

        let mut depth = 0usize;
        let mut found = false;
        let mut probe = self.buckets[bucket].as_deref();
        while let Some(entry) = probe {
            if entry.key == key {
                found = true;
                break;
            }
            depth += 1;
            probe = entry.next.as_deref();
        }
        if !found {
            return None;
        }

        let mut link = &mut self.buckets[bucket];
        for _ in 0..depth {
            match link {
                Some(entry) => link = &mut entry.next,
                None => return None,
            }
        }
        let mut entry = link.take()?;
        *link = entry.next.take();
        self.len -= 1;
        Some(entry.slot)
    }

    fn rehash(&mut self, new_buckets: usize) {
        debug!(
            "rehash: {} -> {} buckets ({} entries)",
            self.buckets.len(),
            new_buckets,
            self.len
        );
        let mut heads = Vec::new();
        heads.resize_with(new_buckets, || None);
        let old = std::mem::replace(&mut self.buckets, heads);
        for head in old {
            let mut cursor = head;
            while let Some(mut entry) = cursor {
                cursor = entry.next.take();
                let bucket = self.bucket_of(entry.hash);
                entry.next = self.buckets[bucket].take();
                self.buckets[bucket] = Some(entry);
            }
        }
    }

    #[cfg(test)]
    fn chain_keys(&self, bucket: usize) -> Vec<String> {
        let mut keys = Vec::new();
        let mut cursor = self.buckets[bucket].as_deref();
        while let Some(entry) = cursor {
            keys.push(entry.key.clone());
            cursor = entry.next.as_deref();
        }
        keys
    }
}

impl Default for HashIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash_key("testKey"), hash_key("testKey"));
        assert_eq!(hash_key(""), 5381);
    }

    #[test]
    fn test_hash_distinguishes_typical_keys() {
        assert_ne!(hash_key("testKey1"), hash_key("testKey2"));
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut index = HashIndex::new();
        index.insert("a", hash_key("a"), 0);
        index.insert("b", hash_key("b"), 1);
        assert_eq!(index.lookup("a"), Some(0));
        assert_eq!(index.lookup("b"), Some(1));
        assert_eq!(index.lookup("c"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_colliding_keys_resolve_by_exact_compare() {
        // One bucket forces every key into the same chain.
        let mut index = HashIndex::with_policy(1, 1000.0);
        index.insert("k1", hash_key("k1"), 10);
        index.insert("k2", hash_key("k2"), 20);
        index.insert("k3", hash_key("k3"), 30);
        assert_eq!(index.lookup("k1"), Some(10));
        assert_eq!(index.lookup("k2"), Some(20));
        assert_eq!(index.lookup("k3"), Some(30));
    }

    #[test]
    fn test_chain_order_most_recent_first() {
        let mut index = HashIndex::with_policy(1, 1000.0);
        index.insert("e1", hash_key("e1"), 0);
        index.insert("e2", hash_key("e2"), 1);
        assert_eq!(index.chain_keys(0), vec!["e2".to_string(), "e1".to_string()]);
    }

    #[test]
    fn test_remove_unlinks_head_middle_and_tail() {
        let mut index = HashIndex::with_policy(1, 1000.0);
        index.insert("a", hash_key("a"), 0);
        index.insert("b", hash_key("b"), 1);
        index.insert("c", hash_key("c"), 2);

        // chain is [c, b, a]; remove the middle first
        assert_eq!(index.remove("b"), Some(1));
        assert_eq!(index.chain_keys(0), vec!["c".to_string(), "a".to_string()]);
        assert_eq!(index.remove("c"), Some(2));
        assert_eq!(index.remove("a"), Some(0));
        assert_eq!(index.remove("a"), None);
        assert!(index.is_empty());
    }

    #[test]
    fn test_rehash_doubles_buckets_and_keeps_entries() {
        let mut index = HashIndex::with_policy(2, 2.0);
        let keys: Vec<String> = (0..32).map(|i| format!("key-{}", i)).collect();
        for (slot, key) in keys.iter().enumerate() {
            index.insert(key, hash_key(key), slot);
        }
        assert!(index.bucket_count() > 2, "load factor never triggered");
        for (slot, key) in keys.iter().enumerate() {
            assert_eq!(index.lookup(key), Some(slot), "lost {} after rehash", key);
        }
        assert_eq!(index.len(), keys.len());
    }

    #[test]
    fn test_fixed_policy_never_rehashes() {
        let mut index = HashIndex::with_policy(4, 1000.0);
        for slot in 0..64 {
            let key = format!("key-{}", slot);
            index.insert(&key, hash_key(&key), slot);
        }
        assert_eq!(index.bucket_count(), 4);
        assert_eq!(index.len(), 64);
    }
}
