//! Staged multi-file patching.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{remove_lines_containing, AnchorError, Patch};

/// Hard failure while staging or writing patches.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A patch that could not be applied because of its anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchFailure {
    /// File the patch targeted
    pub path: PathBuf,
    /// Anchor problem
    pub error: AnchorError,
    /// The text that should be inserted by hand
    pub text: String,
}

/// Result of committing a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Every patch applied; the listed files were rewritten.
    Written(Vec<PathBuf>),
    /// At least one anchor was missing or ambiguous; nothing was written.
    Blocked(Vec<PatchFailure>),
}

#[derive(Debug)]
struct StagedFile {
    original: String,
    current: String,
}

/// In-memory staging area for patches across several files.
///
/// Files are read on first use. [`PatchPlan::commit`] writes only files
/// whose content changed, and only when no anchor failed.
#[derive(Debug, Default)]
pub struct PatchPlan {
    files: BTreeMap<PathBuf, StagedFile>,
    failures: Vec<PatchFailure>,
}

impl PatchPlan {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&mut self, path: &Path) -> Result<&mut StagedFile, PatchError> {
        if !self.files.contains_key(path) {
            let content = std::fs::read_to_string(path).map_err(|source| PatchError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            self.files.insert(
                path.to_path_buf(),
                StagedFile {
                    original: content.clone(),
                    current: content,
                },
            );
        }
        Ok(self
            .files
            .get_mut(path)
            .expect("staged file was just inserted"))
    }

    /// Stage `patch` against `path`.
    ///
    /// Anchor problems are recorded, not returned; only I/O errors fail.
    pub fn apply(&mut self, path: &Path, patch: &Patch) -> Result<(), PatchError> {
        let staged = self.load(path)?;
        match patch.apply_to(&staged.current) {
            Ok(Some(patched)) => {
                tracing::debug!("staged {} in {}", patch, path.display());
                staged.current = patched;
            }
            Ok(None) => {
                tracing::debug!("{} already contains patch", path.display());
            }
            Err(error) => {
                tracing::debug!("cannot patch {}: {}", path.display(), error);
                self.failures.push(PatchFailure {
                    path: path.to_path_buf(),
                    error,
                    text: patch.text().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Stage removal of `patch`'s insertion from `path`.
    ///
    /// A missing file or absent insertion is a no-op.
    pub fn revert(&mut self, path: &Path, patch: &Patch) -> Result<(), PatchError> {
        if !path.exists() {
            return Ok(());
        }
        let staged = self.load(path)?;
        if let Some(reverted) = patch.revert_from(&staged.current) {
            staged.current = reverted;
        }
        Ok(())
    }

    /// Stage removal of every line of `path` containing `token`.
    pub fn remove_lines(&mut self, path: &Path, token: &str) -> Result<(), PatchError> {
        if !path.exists() {
            return Ok(());
        }
        let staged = self.load(path)?;
        if let Some(kept) = remove_lines_containing(&staged.current, token) {
            staged.current = kept;
        }
        Ok(())
    }

    /// Anchor failures recorded so far.
    pub fn failures(&self) -> &[PatchFailure] {
        &self.failures
    }

    /// Files whose staged content differs from disk.
    pub fn changed_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|(_, f)| f.original != f.current)
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Write every changed file, unless an anchor failed.
    pub fn commit(self) -> Result<PatchOutcome, PatchError> {
        if !self.failures.is_empty() {
            return Ok(PatchOutcome::Blocked(self.failures));
        }

        let mut written = Vec::new();
        for (path, staged) in self.files {
            if staged.original == staged.current {
                continue;
            }
            std::fs::write(&path, &staged.current).map_err(|source| PatchError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!("wrote {}", path.display());
            written.push(path);
        }
        Ok(PatchOutcome::Written(written))
    }
}
