//! In-memory file index.
//!
//! The index mirrors the persisted workspace as a tree of
//! [`FileSystemNode`]s. It owns all node lifetimes: other components query
//! it but only mutate through its own create/remove operations, which write
//! through to storage first and commit the node change only on success.
//!
//! The "currently open directory" fallback lives here as an explicit field
//! rather than as ambient global state.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{FolioError, Result};
use crate::fs::FileSystem;

/// Kind of an index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A regular file.
    File,
    /// A directory; may have children.
    Directory,
}

/// One entry in the hierarchical index.
///
/// The path is the natural key; `children` is populated for directories
/// only and keyed by name, preserving insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct FileSystemNode {
    /// Full path of this entry (unique within the index).
    pub path: PathBuf,
    /// Entry name (last path component).
    pub name: String,
    /// File or directory.
    pub kind: NodeKind,
    /// Child nodes, name-keyed, in insertion order. Empty for files.
    pub children: IndexMap<String, FileSystemNode>,
}

impl FileSystemNode {
    fn new(path: PathBuf, kind: NodeKind) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path,
            name,
            kind,
            children: IndexMap::new(),
        }
    }

    /// Returns true if this node is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// The in-memory file index.
///
/// Owns the root tree, the storage handle, and the explicit "currently open
/// directory" used as the fallback target when a creation request carries
/// no directory of its own.
pub struct FileIndex<FS: FileSystem> {
    fs: FS,
    root: FileSystemNode,
    open_directory: Option<PathBuf>,
}

impl<FS: FileSystem> FileIndex<FS> {
    /// Build the index by scanning `root` in storage.
    pub fn scan(fs: FS, root: &Path) -> Result<Self> {
        let root_node = scan_directory(&fs, root)?;
        Ok(Self {
            fs,
            root: root_node,
            open_directory: None,
        })
    }

    /// The storage handle the index writes through.
    pub fn fs_ref(&self) -> &FS {
        &self.fs
    }

    /// The root node of the index.
    pub fn root(&self) -> &FileSystemNode {
        &self.root
    }

    /// The currently open directory, if any.
    pub fn open_directory(&self) -> Option<&FileSystemNode> {
        self.open_directory
            .as_deref()
            .and_then(|p| self.find_directory(p))
    }

    /// Set (or clear) the currently open directory.
    ///
    /// Returns `false` if the path does not name a directory in the index,
    /// in which case the previous value is kept.
    pub fn set_open_directory(&mut self, path: Option<&Path>) -> bool {
        match path {
            None => {
                self.open_directory = None;
                true
            }
            Some(p) => {
                if self.find_directory(p).is_some() {
                    self.open_directory = Some(p.to_path_buf());
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Find a directory node by path. Returns `None` for files and for
    /// paths outside the index.
    pub fn find_directory(&self, path: &Path) -> Option<&FileSystemNode> {
        self.find_node(path).filter(|n| n.is_directory())
    }

    /// Find any node by path.
    pub fn find_node(&self, path: &Path) -> Option<&FileSystemNode> {
        let rel = path.strip_prefix(&self.root.path).ok()?;
        let mut node = &self.root;
        for component in rel.components() {
            let name = component.as_os_str().to_string_lossy();
            node = node.children.get(name.as_ref())?;
        }
        Some(node)
    }

    /// Enumerate the children of a directory, in index order.
    pub fn children<'a>(
        &self,
        dir: &'a FileSystemNode,
    ) -> impl Iterator<Item = &'a FileSystemNode> {
        dir.children.values()
    }

    /// Create a file in `dir` with the given name and content.
    ///
    /// Writes through to storage first; the node is committed to the index
    /// only if the storage create succeeds. Fails if a sibling with the
    /// same name (case-insensitive) is already committed.
    pub fn create_file(&mut self, dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
        let path = dir.join(name);

        {
            let dir_node = self
                .find_directory(dir)
                .ok_or_else(|| FolioError::NotInIndex(dir.to_path_buf()))?;
            // Sibling uniqueness is case-insensitive at commit time
            let lowered = name.to_lowercase();
            if dir_node
                .children
                .values()
                .any(|c| !c.is_directory() && c.name.to_lowercase() == lowered)
            {
                return Err(FolioError::FileCreate {
                    path,
                    source: std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        "a file with this name already exists",
                    ),
                });
            }
        }

        self.fs
            .create_new(&path, content)
            .map_err(|e| FolioError::FileCreate {
                path: path.clone(),
                source: e,
            })?;

        let node = FileSystemNode::new(path.clone(), NodeKind::File);
        if let Some(dir_node) = self.find_node_mut(dir) {
            dir_node.children.insert(node.name.clone(), node);
        }
        Ok(path)
    }

    /// Remove a file from storage and from the index.
    pub fn remove_file(&mut self, path: &Path) -> Result<()> {
        match self.find_node(path) {
            Some(node) if !node.is_directory() => {}
            _ => return Err(FolioError::NotInIndex(path.to_path_buf())),
        }

        self.fs
            .delete_file(path)
            .map_err(|e| FolioError::FileRemove {
                path: path.to_path_buf(),
                source: e,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if let Some(parent) = path.parent()
            && let Some(parent_node) = self.find_node_mut(parent)
        {
            parent_node.children.shift_remove(&name);
        }
        Ok(())
    }

    fn find_node_mut(&mut self, path: &Path) -> Option<&mut FileSystemNode> {
        let rel = path.strip_prefix(&self.root.path).ok()?;
        let mut node = &mut self.root;
        for component in rel.components() {
            let name = component.as_os_str().to_string_lossy().to_string();
            node = node.children.get_mut(&name)?;
        }
        Some(node)
    }
}

fn scan_directory<FS: FileSystem>(fs: &FS, dir: &Path) -> Result<FileSystemNode> {
    let mut node = FileSystemNode::new(dir.to_path_buf(), NodeKind::Directory);
    let entries = fs.list_entries(dir).map_err(|e| FolioError::DirScan {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let child = if fs.is_dir(&entry) {
            scan_directory(fs, &entry)?
        } else {
            FileSystemNode::new(entry, NodeKind::File)
        };
        node.children.insert(child.name.clone(), child);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFileSystem;

    fn index() -> FileIndex<InMemoryFileSystem> {
        let fs = InMemoryFileSystem::new()
            .with_file("ws/plan.md", "# Plan")
            .with_file("ws/notes/idea.md", "")
            .with_dir("ws/empty");
        FileIndex::scan(fs, Path::new("ws")).unwrap()
    }

    #[test]
    fn test_scan_builds_tree() {
        let index = index();
        let root = index.root();
        assert_eq!(root.children.len(), 3);
        assert!(index.find_directory(Path::new("ws/notes")).is_some());
        assert!(index.find_node(Path::new("ws/notes/idea.md")).is_some());
        assert!(index.find_directory(Path::new("ws/plan.md")).is_none());
    }

    #[test]
    fn test_open_directory_requires_indexed_dir() {
        let mut index = index();
        assert!(!index.set_open_directory(Some(Path::new("ws/nope"))));
        assert!(index.open_directory().is_none());
        assert!(index.set_open_directory(Some(Path::new("ws/notes"))));
        assert_eq!(
            index.open_directory().unwrap().path,
            PathBuf::from("ws/notes")
        );
        assert!(index.set_open_directory(None));
        assert!(index.open_directory().is_none());
    }

    #[test]
    fn test_create_file_writes_through() {
        let mut index = index();
        let path = index
            .create_file(Path::new("ws/empty"), "draft.md", "")
            .unwrap();
        assert_eq!(path, PathBuf::from("ws/empty/draft.md"));
        assert!(index.find_node(&path).is_some());
        assert_eq!(index.fs_ref().get_content("ws/empty/draft.md"), Some(String::new()));
    }

    #[test]
    fn test_create_file_rejects_case_insensitive_sibling() {
        let mut index = index();
        let err = index
            .create_file(Path::new("ws"), "PLAN.md", "")
            .unwrap_err();
        assert!(matches!(err, FolioError::FileCreate { .. }));
        // Storage untouched
        assert!(!index.fs_ref().exists(Path::new("ws/PLAN.md")));
    }

    #[test]
    fn test_remove_file_updates_both_sides() {
        let mut index = index();
        index.remove_file(Path::new("ws/plan.md")).unwrap();
        assert!(index.find_node(Path::new("ws/plan.md")).is_none());
        assert!(!index.fs_ref().exists(Path::new("ws/plan.md")));
    }

    #[test]
    fn test_remove_directory_rejected() {
        let mut index = index();
        let err = index.remove_file(Path::new("ws/notes")).unwrap_err();
        assert!(matches!(err, FolioError::NotInIndex(_)));
    }
}
