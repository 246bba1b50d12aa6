//! Flat text-file store
//!
//! Every stored file lives directly inside one base directory:
//! ```text
//! data/
//!   notes.txt
//!   todo.md
//! ```
//!
//! Names coming from requests are validated before they are joined onto the
//! base directory, so no operation can reach outside of it. The store keeps
//! no in-memory state besides the base path; every call goes to disk.

use crate::error::{AppError, Result};
use crate::utils::path_security::ensure_safe_file_name;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Storage accessor scoped to a single base directory
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `base_dir`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::path::PathBuf;
    /// use filedeck::storage::FileStore;
    ///
    /// let store = FileStore::new(PathBuf::from("./data"));
    /// ```
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Create the base directory if it does not exist yet
    pub async fn ensure_base_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir).await?;
        info!(base_dir = %self.base_dir.display(), "File store ready");
        Ok(())
    }

    /// Resolve a request-supplied name to a path inside the base directory
    ///
    /// Rejects anything that is not a single plain path component.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let name = ensure_safe_file_name(name)?;
        let path = self.base_dir.join(name);

        // validated names never have a different parent, keep the invariant explicit
        if path.parent() != Some(self.base_dir.as_path()) {
            return Err(AppError::invalid_name(format!(
                "'{}' resolves outside the base directory",
                name
            )));
        }

        Ok(path)
    }

    /// List entry names in directory enumeration order
    pub async fn list_files(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(AppError::DirectoryRead)?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(AppError::DirectoryRead)? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        debug!(count = names.len(), "Listed files");
        Ok(names)
    }

    /// Whether `name` currently exists in the base directory
    pub async fn file_exists(&self, name: &str) -> Result<bool> {
        let path = self.resolve(name)?;
        fs::try_exists(&path).await.map_err(AppError::Read)
    }

    /// Read a file as text; invalid UTF-8 sequences are replaced, not rejected
    pub async fn read_file(&self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::not_found(format!("File not found: {}", name)))
            }
            Err(e) => Err(AppError::Read(e)),
        }
    }

    /// Create a new file, failing if the name is already taken
    pub async fn create_file(&self, name: &str, content: &str) -> Result<()> {
        let path = self.resolve(name)?;

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(AppError::already_exists("File already exists!"));
            }
            Err(e) => return Err(AppError::Write(e)),
        };

        file.write_all(content.as_bytes())
            .await
            .map_err(AppError::Write)?;
        file.flush().await.map_err(AppError::Write)?;

        info!(file = name, bytes = content.len(), "Created file");
        Ok(())
    }

    /// Rename `old_name` to `new_name` without ever replacing an existing file
    ///
    /// The no-replace check is done by hard-linking the new name first, which
    /// the filesystem refuses atomically when the name is taken. On
    /// filesystems without hard links this falls back to check-then-rename,
    /// where two concurrent renames to the same new name can still race.
    pub async fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()> {
        let from = self.resolve(old_name)?;
        let to = self.resolve(new_name)?;

        match fs::hard_link(&from, &to).await {
            Ok(()) => Self::drop_old_link(&from, &to).await?,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(rename_source_missing()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Err(rename_target_taken()),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::PermissionDenied | ErrorKind::Unsupported
                ) =>
            {
                debug!(error = %e, "Hard link unavailable, using check-then-rename");
                Self::rename_unlinked(&from, &to).await?;
            }
            Err(e) => return Err(AppError::Rename(e)),
        }

        info!(from = old_name, to = new_name, "Renamed file");
        Ok(())
    }

    /// Remove the old name once the new link is in place
    ///
    /// The new link is the only copy left when the old name vanished in the
    /// meantime, so it is kept and the rename counts as done.
    async fn drop_old_link(from: &Path, to: &Path) -> Result<()> {
        match fs::remove_file(from).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(from = %from.display(), "Old name already gone after linking");
                Ok(())
            }
            Err(e) => {
                if let Err(rollback) = fs::remove_file(to).await {
                    warn!(to = %to.display(), error = %rollback, "Failed to drop new link after rename failure");
                }
                Err(AppError::Rename(e))
            }
        }
    }

    async fn rename_unlinked(from: &Path, to: &Path) -> Result<()> {
        if fs::try_exists(to).await.map_err(AppError::Rename)? {
            return Err(rename_target_taken());
        }

        match fs::rename(from, to).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(rename_source_missing()),
            Err(e) => Err(AppError::Rename(e)),
        }
    }

    /// Delete a file
    pub async fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.resolve(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(file = name, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::not_found("File to delete not found."))
            }
            Err(e) => Err(AppError::Delete(e)),
        }
    }
}

fn rename_source_missing() -> AppError {
    AppError::not_found("File to rename not found.")
}

fn rename_target_taken() -> AppError {
    AppError::already_exists("File with the new name already exists!")
}
