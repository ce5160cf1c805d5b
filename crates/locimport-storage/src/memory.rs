//! Process-local content store.

use crate::{ContentItem, ContentRef, ContentTree, StorageError};
use parking_lot::RwLock;
use uuid::Uuid;

/// A content tree held in memory behind a lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tree: RwLock<ContentTree>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with a single root already registered under `key`.
    pub fn with_root(key: &str) -> (Self, ContentRef) {
        let store = Self::new();
        let root = store.register_root(key, Uuid::new_v4(), key);
        (store, root)
    }

    pub fn register_root(&self, key: &str, guid: Uuid, name: &str) -> ContentRef {
        self.tree.write().register_root(key, guid, name)
    }

    pub fn item(&self, id: ContentRef) -> Option<ContentItem> {
        self.tree.read().item(id).cloned()
    }

    pub fn children(&self, parent: ContentRef) -> Vec<ContentItem> {
        self.tree.read().children(parent).cloned().collect()
    }

    /// Copy of the current tree.
    pub fn snapshot(&self) -> ContentTree {
        self.tree.read().clone()
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&ContentTree) -> T) -> T {
        f(&self.tree.read())
    }

    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&mut ContentTree) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        f(&mut self.tree.write())
    }
}

crate::impl_tree_backed_store!(MemoryStore);
