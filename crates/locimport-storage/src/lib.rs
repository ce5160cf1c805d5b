//! Location Content Storage
//!
//! A small hierarchical content store: registered root containers, folders
//! under them, and location entries inside folders.
//!
//! ```text
//! Locations (root, registered by key)
//! ├── east/              folder, display name "East"
//! │   ├── Harbor Office  location entry
//! │   └── Bay Office     location entry
//! └── north-sea/         folder, display name "North Sea"
//! ```
//!
//! The import job only sees the narrow capability traits defined here
//! ([`RootResolver`], [`FolderStore`], [`EntryStore`]), so it can run against
//! [`MemoryStore`], [`FileStore`], or a test fake.
//!
//! Every create call is applied and (for [`FileStore`]) persisted before it
//! returns. There are no multi-call transactions.

pub mod file;
pub mod memory;
pub mod segment;
pub mod tree;


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use segment::url_segment;
pub use tree::ContentTree;

// ============================================================================
// Core Types
// ============================================================================

/// Opaque reference to a stored content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(u64);

impl ContentRef {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The location content type: what a stored entry carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationContent {
    pub location_name: String,
    pub description: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub subdivision: Option<String>,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentKind {
    Folder,
    Location(LocationContent),
}

/// A stored content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentRef,
    /// `None` only for registered roots.
    pub parent: Option<ContentRef>,
    /// Display name.
    pub name: String,
    /// URL segment, unique among siblings.
    pub segment: String,
    pub created: DateTime<Utc>,
    pub kind: ContentKind,
}

impl ContentItem {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ContentKind::Folder)
    }

    pub fn as_location(&self) -> Option<&LocationContent> {
        match &self.kind {
            ContentKind::Location(location) => Some(location),
            ContentKind::Folder => None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("content {0} does not exist")]
    UnknownContent(ContentRef),

    #[error("content {0} is not a folder")]
    NotAFolder(ContentRef),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

// ============================================================================
// Capability Traits
// ============================================================================

/// Resolves registered root containers by key.
pub trait RootResolver {
    /// `Ok(None)` when no root is registered under `key`.
    fn resolve_root(&self, key: &str) -> Result<Option<ContentRef>, StorageError>;
}

pub trait FolderStore {
    /// Direct child folder of `parent` whose segment equals `segment`.
    ///
    /// `segment` must already be normalized with [`url_segment`]. A missing
    /// folder is `Ok(None)`, never an error.
    fn find_child_by_segment(
        &self,
        parent: ContentRef,
        segment: &str,
    ) -> Result<Option<ContentRef>, StorageError>;

    /// Create and persist a folder under `parent` with display name `name`.
    fn create_folder(&self, parent: ContentRef, name: &str) -> Result<ContentRef, StorageError>;
}

pub trait EntryStore {
    /// Location names of the direct child entries of `folder`.
    fn list_child_entry_names(&self, folder: ContentRef) -> Result<BTreeSet<String>, StorageError>;

    /// Create and persist a location entry under `folder`.
    fn create_entry(
        &self,
        folder: ContentRef,
        content: &LocationContent,
    ) -> Result<ContentRef, StorageError>;
}

/// Everything the import job needs from storage.
pub trait ContentStore: RootResolver + FolderStore + EntryStore {}

impl<T: RootResolver + FolderStore + EntryStore + ?Sized> ContentStore for T {}

impl<T: RootResolver + ?Sized> RootResolver for &T {
    fn resolve_root(&self, key: &str) -> Result<Option<ContentRef>, StorageError> {
        (**self).resolve_root(key)
    }
}

impl<T: FolderStore + ?Sized> FolderStore for &T {
    fn find_child_by_segment(
        &self,
        parent: ContentRef,
        segment: &str,
    ) -> Result<Option<ContentRef>, StorageError> {
        (**self).find_child_by_segment(parent, segment)
    }

    fn create_folder(&self, parent: ContentRef, name: &str) -> Result<ContentRef, StorageError> {
        (**self).create_folder(parent, name)
    }
}

impl<T: EntryStore + ?Sized> EntryStore for &T {
    fn list_child_entry_names(&self, folder: ContentRef) -> Result<BTreeSet<String>, StorageError> {
        (**self).list_child_entry_names(folder)
    }

    fn create_entry(
        &self,
        folder: ContentRef,
        content: &LocationContent,
    ) -> Result<ContentRef, StorageError> {
        (**self).create_entry(folder, content)
    }
}

// Both tree-backed stores expose `read`/`write` over a `ContentTree`; the
// capability traits are the same thin delegation for each.
macro_rules! impl_tree_backed_store {
    ($store:ty) => {
        impl $crate::RootResolver for $store {
            fn resolve_root(
                &self,
                key: &str,
            ) -> Result<Option<$crate::ContentRef>, $crate::StorageError> {
                Ok(self.read(|tree| tree.root(key)))
            }
        }

        impl $crate::FolderStore for $store {
            fn find_child_by_segment(
                &self,
                parent: $crate::ContentRef,
                segment: &str,
            ) -> Result<Option<$crate::ContentRef>, $crate::StorageError> {
                self.read(|tree| tree.find_child_folder(parent, segment))
            }

            fn create_folder(
                &self,
                parent: $crate::ContentRef,
                name: &str,
            ) -> Result<$crate::ContentRef, $crate::StorageError> {
                self.write(|tree| tree.create_folder(parent, name))
            }
        }

        impl $crate::EntryStore for $store {
            fn list_child_entry_names(
                &self,
                folder: $crate::ContentRef,
            ) -> Result<std::collections::BTreeSet<String>, $crate::StorageError> {
                self.read(|tree| tree.location_names(folder))
            }

            fn create_entry(
                &self,
                folder: $crate::ContentRef,
                content: &$crate::LocationContent,
            ) -> Result<$crate::ContentRef, $crate::StorageError> {
                self.write(|tree| tree.create_location(folder, content.clone()))
            }
        }
    };
}

pub(crate) use impl_tree_backed_store;
