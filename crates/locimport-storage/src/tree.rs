//! The in-memory content tree shared by every store implementation.

use crate::segment::{unique_segment, url_segment};
use crate::{ContentItem, ContentKind, ContentRef, LocationContent, StorageError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use uuid::Uuid;

/// A registered root container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEntry {
    pub content: ContentRef,
    pub guid: Uuid,
}

/// Roots, folders and location entries.
///
/// Content ids are dense and start at 1; item `n` lives at `items[n - 1]`.
/// Items are never removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentTree {
    roots: BTreeMap<String, RootEntry>,
    items: Vec<ContentItem>,
    #[serde(skip)]
    children: HashMap<ContentRef, Vec<ContentRef>>,
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a serialized tree and rebuild the child index.
    pub fn from_json(bytes: &[u8]) -> Result<Self, StorageError> {
        let mut tree: ContentTree = serde_json::from_slice(bytes)?;
        tree.rebuild_children()?;
        Ok(tree)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, StorageError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    fn rebuild_children(&mut self) -> Result<(), StorageError> {
        self.children.clear();
        for (index, item) in self.items.iter().enumerate() {
            if item.id.id() != index as u64 + 1 {
                return Err(StorageError::Backend(format!(
                    "snapshot item at position {} has id {}",
                    index + 1,
                    item.id
                )));
            }
            if let Some(parent) = item.parent {
                self.children.entry(parent).or_default().push(item.id);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ContentRef) -> Option<&ContentItem> {
        let index = usize::try_from(id.id()).ok()?.checked_sub(1)?;
        self.items.get(index)
    }

    /// Direct children of `parent`, in creation order.
    pub fn children(&self, parent: ContentRef) -> impl Iterator<Item = &ContentItem> + '_ {
        self.children
            .get(&parent)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.item(*id))
    }

    pub fn root(&self, key: &str) -> Option<ContentRef> {
        self.roots.get(key).map(|root| root.content)
    }

    /// The stable identifier a root was registered with.
    pub fn root_guid(&self, key: &str) -> Option<Uuid> {
        self.roots.get(key).map(|root| root.guid)
    }

    /// Register a root container under `key`, once.
    ///
    /// Registering an existing key returns the existing root untouched.
    pub fn register_root(&mut self, key: &str, guid: Uuid, name: &str) -> ContentRef {
        if let Some(existing) = self.root(key) {
            return existing;
        }
        let id = self.push(None, name, url_segment(name), ContentKind::Folder);
        self.roots.insert(
            key.to_string(),
            RootEntry {
                content: id,
                guid,
            },
        );
        id
    }

    fn require_folder(&self, id: ContentRef) -> Result<&ContentItem, StorageError> {
        let item = self.item(id).ok_or(StorageError::UnknownContent(id))?;
        if item.is_folder() {
            Ok(item)
        } else {
            Err(StorageError::NotAFolder(id))
        }
    }

    /// The earliest-created child folder of `parent` with exactly `segment`.
    pub fn find_child_folder(
        &self,
        parent: ContentRef,
        segment: &str,
    ) -> Result<Option<ContentRef>, StorageError> {
        self.require_folder(parent)?;
        Ok(self
            .children(parent)
            .find(|child| child.is_folder() && child.segment == segment)
            .map(|child| child.id))
    }

    pub fn create_folder(
        &mut self,
        parent: ContentRef,
        name: &str,
    ) -> Result<ContentRef, StorageError> {
        self.require_folder(parent)?;
        let segment = self.free_segment(parent, &url_segment(name));
        Ok(self.push(Some(parent), name, segment, ContentKind::Folder))
    }

    pub fn location_names(&self, folder: ContentRef) -> Result<BTreeSet<String>, StorageError> {
        self.require_folder(folder)?;
        Ok(self
            .children(folder)
            .filter_map(ContentItem::as_location)
            .map(|location| location.location_name.clone())
            .collect())
    }

    pub fn create_location(
        &mut self,
        folder: ContentRef,
        content: LocationContent,
    ) -> Result<ContentRef, StorageError> {
        self.require_folder(folder)?;
        let name = content.location_name.clone();
        let segment = self.free_segment(folder, &url_segment(&name));
        Ok(self.push(Some(folder), &name, segment, ContentKind::Location(content)))
    }

    fn free_segment(&self, parent: ContentRef, base: &str) -> String {
        unique_segment(base, |candidate| {
            self.children(parent).any(|child| child.segment == candidate)
        })
    }

    fn push(
        &mut self,
        parent: Option<ContentRef>,
        name: &str,
        segment: String,
        kind: ContentKind,
    ) -> ContentRef {
        let id = ContentRef::new(self.items.len() as u64 + 1);
        self.items.push(ContentItem {
            id,
            parent,
            name: name.to_string(),
            segment,
            created: Utc::now(),
            kind,
        });
        if let Some(parent) = parent {
            self.children.entry(parent).or_default().push(id);
        }
        id
    }
}
