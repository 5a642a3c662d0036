//! Name-conflict resolution for file creation.
//!
//! Determines whether a requested filename collides with an existing entry
//! in the target directory and, if so, whether the embedder allows the
//! existing file to be overwritten. The confirmation is the workflow's only
//! suspension point; it is awaited at most once per run.

use std::future::Future;
use std::pin::Pin;

use crate::index::FileSystemNode;

/// A boxed future for object-safe async confirmation.
///
/// On native targets, futures are `Send` for compatibility with
/// multi-threaded runtimes. On WASM there's no `Send` requirement since
/// JavaScript is single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed future for object-safe async confirmation (WASM version,
/// without the `Send` requirement).
#[cfg(target_arch = "wasm32")]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Outcome of conflict resolution. Computed per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// No same-named file exists; creation may proceed directly.
    NoConflict,
    /// A same-named file exists and the user confirmed overwriting it.
    Overwrite,
    /// A same-named file exists and the user declined; the workflow
    /// terminates without error.
    Abort,
}

/// The overwrite-confirmation collaborator supplied by the embedder.
///
/// Invoked at most once per workflow execution. No timeout is imposed
/// here; the future stays pending until the surrounding application
/// resolves or cancels it.
pub trait ConfirmOverwrite: Send + Sync {
    /// May the existing file named `filename` be overwritten?
    fn confirm_overwrite<'a>(&'a self, filename: &'a str) -> BoxFuture<'a, bool>;
}

/// A confirmation collaborator that always declines. Useful as a safe
/// default and in tests.
pub struct AlwaysDecline;

impl ConfirmOverwrite for AlwaysDecline {
    fn confirm_overwrite<'a>(&'a self, _filename: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(async { false })
    }
}

/// A confirmation collaborator that always confirms.
pub struct AlwaysConfirm;

impl ConfirmOverwrite for AlwaysConfirm {
    fn confirm_overwrite<'a>(&'a self, _filename: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(async { true })
    }
}

/// Search `dir`'s children for an entry blocking creation of `filename`.
///
/// Matching is case-insensitive: there are case-sensitive filesystems, but
/// we disallow same-name-different-case siblings outright rather than
/// distinguishing them. A matching *directory* does not count as a
/// conflict here: files and directories are treated as distinct
/// namespaces, and it is left to storage to refuse the create if it
/// cannot represent both.
pub fn find_existing<'a>(dir: &'a FileSystemNode, filename: &str) -> Option<&'a FileSystemNode> {
    let lowered = filename.to_lowercase();
    dir.children
        .values()
        .find(|child| !child.is_directory() && child.name.to_lowercase() == lowered)
}

/// Resolve a potential conflict, asking for confirmation when an existing
/// file matches.
///
/// The confirmation is asked about `filename`, the requested resolved
/// name, which may differ in case from the existing entry's name.
pub async fn resolve(
    existing: Option<&FileSystemNode>,
    filename: &str,
    confirm: &dyn ConfirmOverwrite,
) -> ConflictDecision {
    match existing {
        None => ConflictDecision::NoConflict,
        Some(_) => {
            if confirm.confirm_overwrite(filename).await {
                ConflictDecision::Overwrite
            } else {
                ConflictDecision::Abort
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FileSystem, InMemoryFileSystem};
    use crate::index::FileIndex;
    use futures_lite::future::block_on;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dir_with(entries: &[&str]) -> FileSystemNode {
        let fs = InMemoryFileSystem::new().with_dir("d");
        for entry in entries {
            if let Some(name) = entry.strip_suffix('/') {
                fs.create_dir_all(&Path::new("d").join(name)).unwrap();
            } else {
                fs.write_file(&Path::new("d").join(entry), "").unwrap();
            }
        }
        let index = FileIndex::scan(fs, Path::new("d")).unwrap();
        index.root().clone()
    }

    #[test]
    fn test_find_existing_case_insensitive() {
        let dir = dir_with(&["note.md"]);
        let found = find_existing(&dir, "Note.md").unwrap();
        assert_eq!(found.name, "note.md");
    }

    #[test]
    fn test_directory_never_blocks_file() {
        // A directory and file with the same name are distinct namespaces
        let dir = dir_with(&["draft.md/"]);
        assert!(find_existing(&dir, "draft.md").is_none());
    }

    #[test]
    fn test_resolve_no_conflict_skips_confirmation() {
        struct Panicking;
        impl ConfirmOverwrite for Panicking {
            fn confirm_overwrite<'a>(&'a self, _f: &'a str) -> BoxFuture<'a, bool> {
                panic!("confirmation must not be requested without a conflict");
            }
        }
        let decision = block_on(resolve(None, "note.md", &Panicking));
        assert_eq!(decision, ConflictDecision::NoConflict);
    }

    #[test]
    fn test_resolve_declined_aborts() {
        let dir = dir_with(&["note.md"]);
        let existing = find_existing(&dir, "NOTE.md");
        let decision = block_on(resolve(existing, "NOTE.md", &AlwaysDecline));
        assert_eq!(decision, ConflictDecision::Abort);
    }

    #[test]
    fn test_resolve_confirmed_overwrites_and_asks_once() {
        struct Counting(AtomicUsize);
        impl ConfirmOverwrite for Counting {
            fn confirm_overwrite<'a>(&'a self, _f: &'a str) -> BoxFuture<'a, bool> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Box::pin(async { true })
            }
        }
        let dir = dir_with(&["note.md"]);
        let confirm = Counting(AtomicUsize::new(0));
        let decision = block_on(resolve(find_existing(&dir, "note.md"), "note.md", &confirm));
        assert_eq!(decision, ConflictDecision::Overwrite);
        assert_eq!(confirm.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resolve_asks_about_the_requested_name() {
        // The question is about the name being created, not the existing
        // entry's casing
        struct Recording(std::sync::Mutex<Option<String>>);
        impl ConfirmOverwrite for Recording {
            fn confirm_overwrite<'a>(&'a self, filename: &'a str) -> BoxFuture<'a, bool> {
                *self.0.lock().unwrap() = Some(filename.to_string());
                Box::pin(async { false })
            }
        }
        let dir = dir_with(&["plan.md"]);
        let confirm = Recording(std::sync::Mutex::new(None));
        block_on(resolve(find_existing(&dir, "PLAN.md"), "PLAN.md", &confirm));
        assert_eq!(confirm.0.lock().unwrap().as_deref(), Some("PLAN.md"));
    }
}
