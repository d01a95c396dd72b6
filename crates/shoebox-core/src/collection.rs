//! Growable document collection backed by a slot arena and a hash index.

use crate::index::{hash_key, HashIndex};
use crate::models::Document;

/// First allocation size for the arena backing store.
pub const INITIAL_CAPACITY: usize = 8;

/// Ordered, growable container of documents plus the index that resolves
/// ids to slots.
///
/// Documents are owned by the arena and nowhere else; index entries hold
/// slot numbers. Removal tombstones the slot and recycles it through a free
/// list, so slot numbers handed out earlier stay valid for the documents
/// still living in them. Dropping the collection releases every document
/// and index entry exactly once.
pub struct Collection {
    slots: Vec<Option<Document>>,
    free: Vec<usize>,
    index: HashIndex,
}

impl Collection {
    pub fn new() -> Self {
        Self::with_index(HashIndex::new())
    }

    /// Collection over an index with explicit bucket/rehash policy.
    pub fn with_index(index: HashIndex) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index,
        }
    }

    /// Number of live documents.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Current backing capacity of the arena.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Insert a document and register its id in the index. Returns the
    /// slot, which stays stable for the document's lifetime.
    ///
    /// The backing store doubles when full, starting from
    /// [`INITIAL_CAPACITY`]; a tombstoned slot is reused before the arena
    /// grows.
    pub fn insert(&mut self, document: Document) -> usize {
        let hash = hash_key(&document.id);
        let key = document.id.clone();
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(document);
                slot
            }
            None => {
                if self.slots.len() == self.slots.capacity() {
                    let grow = if self.slots.capacity() == 0 {
                        INITIAL_CAPACITY
                    } else {
                        self.slots.capacity()
                    };
                    self.slots.reserve_exact(grow);
                }
                self.slots.push(Some(document));
                self.slots.len() - 1
            }
        };
        self.index.insert(&key, hash, slot);
        slot
    }

    /// Document for `id`, if live.
    pub fn get(&self, id: &str) -> Option<&Document> {
        let slot = self.index.lookup(id)?;
        self.slots.get(slot)?.as_ref()
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Document> {
        let slot = self.index.lookup(id)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Document at a slot previously returned by [`insert`](Self::insert).
    pub fn get_slot(&self, slot: usize) -> Option<&Document> {
        self.slots.get(slot)?.as_ref()
    }

    /// Unlink `id` from the index and tombstone its slot.
    pub fn remove(&mut self, id: &str) -> Option<Document> {
        let slot = self.index.remove(id)?;
        let doc = self.slots.get_mut(slot)?.take();
        if doc.is_some() {
            self.free.push(slot);
        }
        doc
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.lookup(id).is_some()
    }

    /// Live documents in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}
