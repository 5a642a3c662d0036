//! The file-creation workflow.
//!
//! [`Folio`] is the orchestrator that composes the name sanitizer, the
//! extension policy, the file index, the conflict resolver, and the
//! document manager into the two creation operations exposed through the
//! command surface. Its contract is "never throws": every failure is
//! converted at this boundary into a prompt and/or a log entry and reported
//! to the caller only as a [`Response::Failed`] value.

use std::path::{Path, PathBuf};

use crate::command::{Command, Response};
use crate::config::Config;
use crate::conflict::{self, ConfirmOverwrite, ConflictDecision};
use crate::documents::DocumentManager;
use crate::error::{FolioError, Result};
use crate::fs::FileSystem;
use crate::index::FileIndex;
use crate::naming::{self, ExtensionPolicy};
use crate::prompt::{Prompt, Prompter};

/// Terminal outcome of one file-creation run, before it is mapped onto the
/// response surface.
enum CreateOutcome {
    Created(PathBuf),
    Aborted,
}

/// The main Folio instance.
///
/// Owns the file index (and through it the storage handle), the document
/// manager, and the extension policy. The index and document manager are
/// shared, mutable, process-wide structures in a full application; this
/// crate models the creation workflow as their only writer.
pub struct Folio<FS: FileSystem> {
    index: FileIndex<FS>,
    documents: DocumentManager,
    policy: ExtensionPolicy,
}

impl<FS: FileSystem> Folio<FS> {
    /// Open a workspace rooted at `root`, scanning it into the index, with
    /// the default extension policy.
    pub fn open(fs: FS, root: &Path) -> Result<Self> {
        Self::with_config(fs, root, &Config::default())
    }

    /// Open a workspace with extension settings taken from `config`.
    pub fn with_config(fs: FS, root: &Path, config: &Config) -> Result<Self> {
        Ok(Self {
            index: FileIndex::scan(fs, root)?,
            documents: DocumentManager::new(),
            policy: config.extension_policy(),
        })
    }

    /// The file index.
    pub fn index(&self) -> &FileIndex<FS> {
        &self.index
    }

    /// Mutable access to the file index (e.g. to set the open directory).
    pub fn index_mut(&mut self) -> &mut FileIndex<FS> {
        &mut self.index
    }

    /// The document manager.
    pub fn documents(&self) -> &DocumentManager {
        &self.documents
    }

    /// Mutable access to the document manager.
    pub fn documents_mut(&mut self) -> &mut DocumentManager {
        &mut self.documents
    }

    /// Parse and execute a raw JSON command payload.
    ///
    /// Malformed payloads are rejected here, before any workflow state is
    /// touched; the rejection is logged but not prompted.
    pub async fn execute_json(
        &mut self,
        payload: &str,
        confirm: &dyn ConfirmOverwrite,
        prompter: &dyn Prompter,
    ) -> Response {
        match Command::from_json(payload) {
            Ok(command) => self.execute(command, confirm, prompter).await,
            Err(e) => {
                log::error!("Rejected command payload: {e}");
                Response::Failed(e.to_serializable())
            }
        }
    }

    /// Execute a command.
    ///
    /// This never returns an error: failures become a log entry, a prompt
    /// where the taxonomy calls for one, and a [`Response::Failed`] value.
    /// The only await point is the overwrite confirmation.
    ///
    /// Between the conflict check and the mutate step there is a window in
    /// which the index could be modified by another writer. This crate
    /// models the workflow as the index's only writer, so the race is
    /// accepted rather than locked against; embedders running concurrent
    /// mutators should serialize creations per target directory.
    pub async fn execute(
        &mut self,
        command: Command,
        confirm: &dyn ConfirmOverwrite,
        prompter: &dyn Prompter,
    ) -> Response {
        match command {
            Command::CreateUnsavedDocument => {
                // This path touches neither the index nor storage
                let id = self.documents.create_unsaved().id;
                Response::UnsavedCreated { id }
            }

            Command::CreateFile { path, name } => {
                match self.create_file(path.as_deref(), &name, confirm).await {
                    Ok(CreateOutcome::Created(path)) => Response::Created { path },
                    // A declined overwrite is a user decision, not a failure:
                    // no prompt, no error-level log entry
                    Ok(CreateOutcome::Aborted) => Response::Aborted,
                    Err(e) => {
                        log::error!("Could not create file: {e}");
                        match &e {
                            // Nothing actionable to offer the user here
                            FolioError::NoTargetDirectory(_) => {}
                            _ => prompter
                                .prompt(Prompt::error("Could not create file", e.to_string())),
                        }
                        Response::Failed(e.to_serializable())
                    }
                }
            }
        }
    }

    /// Synchronous wrapper around [`Folio::execute`] for embedders without
    /// an async runtime. Blocks on the confirmation suspension point, so
    /// the supplied collaborator must resolve without yielding back to this
    /// thread. Not available on WASM.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn execute_sync(
        &mut self,
        command: Command,
        confirm: &dyn ConfirmOverwrite,
        prompter: &dyn Prompter,
    ) -> Response {
        futures_lite::future::block_on(self.execute(command, confirm, prompter))
    }

    /// The create-file state machine: resolve target, normalize the name,
    /// check conflicts (awaiting confirmation if needed), mutate, activate.
    async fn create_file(
        &mut self,
        path: Option<&str>,
        name: &str,
        confirm: &dyn ConfirmOverwrite,
    ) -> Result<CreateOutcome> {
        // ResolveTarget: explicit path first, then the open-directory
        // fallback
        let dir = path
            .and_then(|p| self.index.find_directory(Path::new(p)))
            .or_else(|| self.index.open_directory())
            .map(|node| node.path.clone())
            .ok_or_else(|| FolioError::NoTargetDirectory(name.to_string()))?;

        // Normalize: sanitize, then apply the extension policy
        let filename = naming::sanitize(name);
        if filename.trim().is_empty() {
            return Err(FolioError::InvalidName(name.to_string()));
        }
        let filename = self.policy.apply_default(&filename);

        // CheckConflict: at most one confirmation per run
        let dir_node = self
            .index
            .find_directory(&dir)
            .ok_or_else(|| FolioError::NotInIndex(dir.clone()))?;
        let existing = conflict::find_existing(dir_node, &filename).map(|n| n.path.clone());
        match conflict::resolve(
            existing
                .as_deref()
                .and_then(|p| self.index.find_node(p)),
            &filename,
            confirm,
        )
        .await
        {
            ConflictDecision::Abort => return Ok(CreateOutcome::Aborted),
            ConflictDecision::Overwrite => {
                // Remove the file before creating it anew
                if let Some(existing) = existing {
                    self.index.remove_file(&existing)?;
                }
            }
            ConflictDecision::NoConflict => {}
        }

        // Mutate: create with empty content, then activate the new entry
        let created = self.index.create_file(&dir, &filename, "")?;
        self.documents.open_path(&created, &self.index)?;
        Ok(CreateOutcome::Created(created))
    }
}
