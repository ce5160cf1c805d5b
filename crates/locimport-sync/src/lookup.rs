//! Region folder lookup and the per-folder name index.

use locimport_storage::{url_segment, ContentRef, EntryStore, FolderStore, StorageError};
use std::collections::BTreeSet;

/// The child folder of `root` for `region_key`, matched on its URL segment.
///
/// Display-name casing and spacing do not matter. Absence is `Ok(None)`.
pub fn find_region_folder<S: FolderStore + ?Sized>(
    store: &S,
    root: ContentRef,
    region_key: &str,
) -> Result<Option<ContentRef>, StorageError> {
    store.find_child_by_segment(root, &url_segment(region_key))
}

/// Names of the location entries already stored under `folder`.
pub fn existing_entry_names<S: EntryStore + ?Sized>(
    store: &S,
    folder: ContentRef,
) -> Result<BTreeSet<String>, StorageError> {
    let names = store.list_child_entry_names(folder)?;
    tracing::debug!(folder = %folder, existing = names.len(), "loaded existing entry names");
    Ok(names)
}
