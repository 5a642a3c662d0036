//! In-memory filesystem implementation.
//!
//! Backing store for tests and for embedders without a real disk (e.g. a
//! browser bridge that syncs elsewhere). Uses `Arc<Mutex<..>>` so clones
//! share the same underlying storage.

use std::collections::HashMap;
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::FileSystem;

#[derive(Debug, Clone)]
enum Entry {
    File(String),
    Directory,
}

/// An in-memory filesystem.
///
/// Directories must be created explicitly (via [`FileSystem::create_dir_all`])
/// before files can be listed under them, mirroring real filesystem behavior
/// closely enough for the file index to scan it.
#[derive(Clone, Default)]
pub struct InMemoryFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, Entry>>>,
}

impl InMemoryFileSystem {
    /// Create a new empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder pattern, creating parent directories implicitly).
    pub fn with_file(self, path: &str, content: &str) -> Self {
        let path = PathBuf::from(path);
        {
            let mut entries = self.entries.lock().unwrap();
            let mut parent = path.parent();
            while let Some(dir) = parent {
                if !dir.as_os_str().is_empty() {
                    entries.insert(dir.to_path_buf(), Entry::Directory);
                }
                parent = dir.parent();
            }
            entries.insert(path, Entry::File(content.to_string()));
        }
        self
    }

    /// Add a directory and its parents (builder pattern).
    pub fn with_dir(self, path: &str) -> Self {
        {
            let mut entries = self.entries.lock().unwrap();
            let mut current = Some(Path::new(path));
            while let Some(dir) = current {
                if !dir.as_os_str().is_empty() {
                    entries.insert(dir.to_path_buf(), Entry::Directory);
                }
                current = dir.parent();
            }
        }
        self
    }

    /// Get the content of a file (for test assertions).
    pub fn get_content(&self, path: &str) -> Option<String> {
        match self.entries.lock().unwrap().get(&PathBuf::from(path)) {
            Some(Entry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.entries.lock().unwrap().get(path) {
            Some(Entry::File(content)) => Ok(content.clone()),
            Some(Entry::Directory) => Err(Error::new(ErrorKind::IsADirectory, "Is a directory")),
            None => Err(Error::new(ErrorKind::NotFound, "File not found")),
        }
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if matches!(entries.get(path), Some(Entry::Directory)) {
            return Err(Error::new(ErrorKind::IsADirectory, "Is a directory"));
        }
        entries.insert(path.to_path_buf(), Entry::File(content.to_string()));
        Ok(())
    }

    fn create_new(&self, path: &Path, content: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(path) {
            return Err(Error::new(ErrorKind::AlreadyExists, "File exists"));
        }
        entries.insert(path.to_path_buf(), Entry::File(content.to_string()));
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(Entry::File(_)) => {
                entries.remove(path);
                Ok(())
            }
            Some(Entry::Directory) => Err(Error::new(ErrorKind::IsADirectory, "Is a directory")),
            None => Err(Error::new(ErrorKind::NotFound, "File not found")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(
            self.entries.lock().unwrap().get(path),
            Some(Entry::Directory)
        )
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let mut current = Some(path);
        while let Some(dir) = current {
            if !dir.as_os_str().is_empty() {
                if matches!(entries.get(dir), Some(Entry::File(_))) {
                    return Err(Error::new(ErrorKind::AlreadyExists, "Path is a file"));
                }
                entries.insert(dir.to_path_buf(), Entry::Directory);
            }
            current = dir.parent();
        }
        Ok(())
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = self.entries.lock().unwrap();
        if !matches!(entries.get(dir), Some(Entry::Directory)) {
            return Err(Error::new(ErrorKind::NotFound, "Directory not found"));
        }
        let mut result: Vec<PathBuf> = entries
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect();
        result.sort();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_file_creates_parents() {
        let fs = InMemoryFileSystem::new().with_file("a/b/c.md", "hi");
        assert!(fs.is_dir(Path::new("a")));
        assert!(fs.is_dir(Path::new("a/b")));
        assert_eq!(fs.get_content("a/b/c.md"), Some("hi".to_string()));
    }

    #[test]
    fn test_clones_share_storage() {
        let fs = InMemoryFileSystem::new().with_dir("d");
        let clone = fs.clone();
        clone.write_file(Path::new("d/x.md"), "shared").unwrap();
        assert_eq!(fs.get_content("d/x.md"), Some("shared".to_string()));
    }

    #[test]
    fn test_list_entries_one_level() {
        let fs = InMemoryFileSystem::new()
            .with_file("d/a.md", "")
            .with_file("d/sub/deep.md", "");
        let entries = fs.list_entries(Path::new("d")).unwrap();
        assert_eq!(entries, vec![PathBuf::from("d/a.md"), PathBuf::from("d/sub")]);
    }

    #[test]
    fn test_delete_directory_rejected() {
        let fs = InMemoryFileSystem::new().with_dir("d");
        assert!(fs.delete_file(Path::new("d")).is_err());
    }
}
