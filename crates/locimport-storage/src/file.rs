//! File-backed content store.
//!
//! The whole tree is kept in memory and rewritten as a JSON snapshot after
//! every create. A write lands in `<path>.tmp`, is synced, then renamed over
//! the snapshot, so a crash leaves either the old or the new tree on disk.
//! On unix the parent directory is synced after the rename as well.
//!
//! Each create clones and rewrites the full tree, so importing `n` items
//! costs O(n²) bytes written. Fine for location datasets in the thousands;
//! larger trees want an append log instead.

use crate::{ContentItem, ContentRef, ContentTree, StorageError};
use parking_lot::RwLock;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileStore {
    path: PathBuf,
    tree: RwLock<ContentTree>,
}

impl FileStore {
    /// Open the snapshot at `path`, or start an empty tree if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let tree = if path.exists() {
            let bytes = fs::read(&path)?;
            ContentTree::from_json(&bytes)?
        } else {
            ContentTree::new()
        };
        tracing::debug!(path = %path.display(), items = tree.len(), "opened content store");
        Ok(Self {
            path,
            tree: RwLock::new(tree),
        })
    }

    /// Register a root container and persist it. Idempotent per key.
    pub fn register_root(
        &self,
        key: &str,
        guid: Uuid,
        name: &str,
    ) -> Result<ContentRef, StorageError> {
        self.write(|tree| Ok(tree.register_root(key, guid, name)))
    }

    pub fn item(&self, id: ContentRef) -> Option<ContentItem> {
        self.tree.read().item(id).cloned()
    }

    pub fn children(&self, parent: ContentRef) -> Vec<ContentItem> {
        self.tree.read().children(parent).cloned().collect()
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&ContentTree) -> T) -> T {
        f(&self.tree.read())
    }

    // Mutates a copy and only swaps it in once the snapshot is on disk, so the
    // in-memory tree never runs ahead of what was persisted.
    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&mut ContentTree) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self.tree.write();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        if let Err(err) = persist(&self.path, &next) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist content snapshot");
            return Err(err);
        }
        *guard = next;
        Ok(out)
    }
}

fn persist(path: &Path, tree: &ContentTree) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    let bytes = tree.to_json()?;
    let mut file = File::create(&tmp)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp, path)?;
    sync_parent_dir(path)?;
    Ok(())
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<(), StorageError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}

crate::impl_tree_backed_store!(FileStore);
