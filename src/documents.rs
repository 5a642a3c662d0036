//! Open-document tracking.
//!
//! The document manager owns all unsaved (in-memory) documents and holds a
//! non-owning reference to the single active document, which may be either
//! a stored file or an unsaved document. Unsaved documents never appear in
//! the file index; they become index entries only through an explicit save
//! action that lives outside this crate.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{FolioError, Result};
use crate::index::FileIndex;
use crate::fs::FileSystem;

/// A document that exists only in memory, with no index entry.
#[derive(Debug, Clone, Serialize)]
pub struct UnsavedDocument {
    /// Generated identifier, unique within this manager.
    pub id: u64,
    /// Seed content (usually empty).
    pub content: String,
}

/// Reference to an open document: either a stored file (by path) or an
/// unsaved document (by id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "ref")]
pub enum DocumentRef {
    /// A document backed by a file in the index.
    Stored(PathBuf),
    /// A purely in-memory document.
    Unsaved(u64),
}

/// Tracks open documents and the active one.
#[derive(Debug, Default)]
pub struct DocumentManager {
    unsaved: IndexMap<u64, UnsavedDocument>,
    next_id: u64,
    active: Option<DocumentRef>,
}

impl DocumentManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new unsaved document with empty content and set it active.
    pub fn create_unsaved(&mut self) -> &UnsavedDocument {
        self.next_id += 1;
        let id = self.next_id;
        self.unsaved.insert(
            id,
            UnsavedDocument {
                id,
                content: String::new(),
            },
        );
        self.active = Some(DocumentRef::Unsaved(id));
        &self.unsaved[&id]
    }

    /// Look up an unsaved document by id.
    pub fn unsaved(&self, id: u64) -> Option<&UnsavedDocument> {
        self.unsaved.get(&id)
    }

    /// Close an unsaved document without saving, destroying its content.
    /// Clears the active reference if it pointed at this document.
    pub fn close_unsaved(&mut self, id: u64) {
        self.unsaved.shift_remove(&id);
        if self.active == Some(DocumentRef::Unsaved(id)) {
            self.active = None;
        }
    }

    /// Open a stored file as the active document.
    ///
    /// The path must resolve to a file in the index; opening something the
    /// index does not know about is an error.
    pub fn open_path<FS: FileSystem>(&mut self, path: &Path, index: &FileIndex<FS>) -> Result<()> {
        match index.find_node(path) {
            Some(node) if !node.is_directory() => {
                self.active = Some(DocumentRef::Stored(path.to_path_buf()));
                Ok(())
            }
            _ => Err(FolioError::NotInIndex(path.to_path_buf())),
        }
    }

    /// Set the active document directly.
    pub fn set_active(&mut self, doc: Option<DocumentRef>) {
        self.active = doc;
    }

    /// The active document, if any. At most one at a time.
    pub fn active(&self) -> Option<&DocumentRef> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFileSystem;

    #[test]
    fn test_create_unsaved_sets_active() {
        let mut docs = DocumentManager::new();
        let id = docs.create_unsaved().id;
        assert_eq!(docs.active(), Some(&DocumentRef::Unsaved(id)));
        assert_eq!(docs.unsaved(id).unwrap().content, "");
    }

    #[test]
    fn test_unsaved_ids_are_unique() {
        let mut docs = DocumentManager::new();
        let a = docs.create_unsaved().id;
        let b = docs.create_unsaved().id;
        assert_ne!(a, b);
        // The second creation stole the active slot
        assert_eq!(docs.active(), Some(&DocumentRef::Unsaved(b)));
    }

    #[test]
    fn test_close_unsaved_destroys_and_deactivates() {
        let mut docs = DocumentManager::new();
        let id = docs.create_unsaved().id;
        docs.close_unsaved(id);
        assert!(docs.unsaved(id).is_none());
        assert!(docs.active().is_none());
    }

    #[test]
    fn test_open_path_requires_indexed_file() {
        let fs = InMemoryFileSystem::new().with_file("ws/plan.md", "");
        let index = FileIndex::scan(fs, Path::new("ws")).unwrap();
        let mut docs = DocumentManager::new();

        docs.open_path(Path::new("ws/plan.md"), &index).unwrap();
        assert_eq!(
            docs.active(),
            Some(&DocumentRef::Stored(PathBuf::from("ws/plan.md")))
        );

        let err = docs.open_path(Path::new("ws/ghost.md"), &index).unwrap_err();
        assert!(matches!(err, FolioError::NotInIndex(_)));
    }
}
