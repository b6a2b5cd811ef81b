//! Process-wide session slots: the current resume and the current save directory.
//!
//! Both slots hold at most one value and are replaced whole. Readers clone an `Arc`
//! snapshot, so a concurrent `set_*` never exposes a half-updated value.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::generation::error::GenerationError;

/// Extensions accepted for uploaded resume files.
const RESUME_FILE_EXTENSIONS: &[&str] = &["txt", "md"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeState {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveLocationState {
    /// Canonicalized at set time.
    pub directory_path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub resume_set: bool,
    pub resume_length: usize,
    pub save_location: Option<String>,
}

/// Owner of the single active resume and save location.
/// Shared by reference (`Arc<SessionState>`) with the pipeline and the HTTP layer.
#[derive(Debug, Default)]
pub struct SessionState {
    resume: RwLock<Option<Arc<ResumeState>>>,
    save_location: RwLock<Option<Arc<SaveLocationState>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current resume and returns its length in chars.
    /// Whitespace-only content is rejected and leaves the slot untouched.
    pub fn set_resume(&self, content: String) -> Result<usize, GenerationError> {
        if content.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "resume content cannot be empty".to_string(),
            ));
        }
        let length = content.chars().count();
        let next = Arc::new(ResumeState { content });
        *self.resume.write().unwrap_or_else(PoisonError::into_inner) = Some(next);
        info!("Resume replaced ({length} chars)");
        Ok(length)
    }

    pub fn resume(&self) -> Option<Arc<ResumeState>> {
        self.resume
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validates `directory_path` and, only if valid, replaces the current save location.
    pub fn set_save_location(&self, directory_path: &str) -> Result<PathBuf, GenerationError> {
        if directory_path.trim().is_empty() {
            return Err(GenerationError::SaveLocationInvalid(
                "directory path cannot be empty".to_string(),
            ));
        }
        let resolved = validate_save_directory(Path::new(directory_path.trim()))?;
        let next = Arc::new(SaveLocationState {
            directory_path: resolved.clone(),
        });
        *self
            .save_location
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(next);
        info!("Save location set to {}", resolved.display());
        Ok(resolved)
    }

    pub fn save_location(&self) -> Option<Arc<SaveLocationState>> {
        self.save_location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn status(&self) -> SessionStatus {
        let resume = self.resume();
        SessionStatus {
            resume_set: resume.is_some(),
            resume_length: resume.map(|r| r.content.chars().count()).unwrap_or(0),
            save_location: self
                .save_location()
                .map(|s| s.directory_path.display().to_string()),
        }
    }
}

/// Checks that `path` exists, is a directory, and accepts new files.
/// Returns the canonical absolute path.
pub fn validate_save_directory(path: &Path) -> Result<PathBuf, GenerationError> {
    let metadata = std::fs::metadata(path).map_err(|_| {
        GenerationError::SaveLocationInvalid(format!(
            "directory does not exist: {}",
            path.display()
        ))
    })?;
    if !metadata.is_dir() {
        return Err(GenerationError::SaveLocationInvalid(format!(
            "path is not a directory: {}",
            path.display()
        )));
    }

    let resolved = std::fs::canonicalize(path).map_err(|e| {
        GenerationError::SaveLocationInvalid(format!("cannot resolve {}: {e}", path.display()))
    })?;

    // Probe writability with an anonymous file that is unlinked on drop.
    tempfile::tempfile_in(&resolved).map_err(|e| {
        GenerationError::SaveLocationInvalid(format!(
            "directory is not writable: {} ({e})",
            resolved.display()
        ))
    })?;

    Ok(resolved)
}

/// Decodes an uploaded resume file. Only UTF-8 `.txt` and `.md` files are accepted.
pub fn resume_from_upload(filename: &str, data: Bytes) -> Result<String, GenerationError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if RESUME_FILE_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            return Err(GenerationError::InvalidInput(
                "Only .txt and .md files are supported".to_string(),
            ))
        }
    }

    String::from_utf8(data.to_vec()).map_err(|_| {
        GenerationError::InvalidInput(format!("{filename} is not valid UTF-8 text"))
    })
}
