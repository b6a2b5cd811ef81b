//! Cover-letter pipeline — sequences extraction, composition, naming and rendering.
//!
//! Flow: check resume → check save location → extract metadata → compose letter →
//!       derive filename → write PDF → result.
//!
//! Every stage short-circuits on its first error. Nothing is retried here; a failed
//! request is resubmitted by the caller. Stage errors never escape `generate`: they are
//! folded into a `GenerationResult` with `success = false`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};

use crate::generation::composer::{compose, CoverLetterDraft};
use crate::generation::error::{ErrorKind, GenerationError};
use crate::generation::filename::derive;
use crate::generation::metadata::{extract, JobMetadata};
use crate::llm_client::LanguageModel;
use crate::render::PdfWriter;
use crate::session::{validate_save_directory, SessionState, SessionStatus};

/// Pipeline states, in order. Failure can leave from any state before `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Extracting,
    Composing,
    Naming,
    Writing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Extracting => "extracting",
            Stage::Composing => "composing",
            Stage::Naming => "naming",
            Stage::Writing => "writing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of one `generate` call. `success = true` implies a file exists at `file_path`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(flatten)]
    pub metadata: Option<JobMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorKind>,
}

impl GenerationResult {
    fn succeeded(letter: WrittenLetter) -> Self {
        Self {
            success: true,
            file_path: Some(letter.path.display().to_string()),
            filename: Some(letter.filename),
            metadata: Some(letter.metadata),
            error: None,
            error_code: None,
        }
    }

    fn failed(err: &GenerationError) -> Self {
        Self {
            success: false,
            file_path: None,
            filename: None,
            metadata: None,
            error: Some(err.to_string()),
            error_code: Some(err.kind()),
        }
    }
}

struct WrittenLetter {
    path: PathBuf,
    filename: String,
    metadata: JobMetadata,
}

/// The orchestrator. Owns nothing global: session, model and writer are injected.
#[derive(Clone)]
pub struct CoverLetterPipeline {
    session: Arc<SessionState>,
    llm: Arc<dyn LanguageModel>,
    writer: Arc<dyn PdfWriter>,
}

impl CoverLetterPipeline {
    pub fn new(
        session: Arc<SessionState>,
        llm: Arc<dyn LanguageModel>,
        writer: Arc<dyn PdfWriter>,
    ) -> Self {
        Self {
            session,
            llm,
            writer,
        }
    }

    pub fn set_resume(&self, content: String) -> Result<usize, GenerationError> {
        self.session.set_resume(content)
    }

    pub fn set_save_location(&self, directory_path: &str) -> Result<PathBuf, GenerationError> {
        self.session.set_save_location(directory_path)
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    /// Runs the full pipeline for one job description.
    pub async fn generate(&self, job_description: &str) -> GenerationResult {
        let span = info_span!("generate", jd_chars = job_description.len());
        match self.run(job_description).instrument(span).await {
            Ok(letter) => {
                info!("Cover letter written to {}", letter.path.display());
                GenerationResult::succeeded(letter)
            }
            Err(err) => {
                warn!(error_code = ?err.kind(), "Cover letter generation failed: {err}");
                GenerationResult::failed(&err)
            }
        }
    }

    async fn run(&self, job_description: &str) -> Result<WrittenLetter, GenerationError> {
        enter(Stage::Start);
        // One snapshot of each slot for the whole request.
        let resume = self.session.resume().ok_or(GenerationError::NoResumeSet)?;
        let location = self.session.save_location().ok_or_else(|| {
            GenerationError::SaveLocationInvalid(
                "Save location not set. Choose a save directory first.".to_string(),
            )
        })?;
        // The directory may have vanished since it was set.
        let directory = validate_save_directory(&location.directory_path)?;

        enter(Stage::Extracting);
        let metadata = extract(job_description, self.llm.as_ref()).await?;

        enter(Stage::Composing);
        let draft = compose(&resume.content, job_description, &metadata, self.llm.as_ref()).await?;

        enter(Stage::Naming);
        let filename = derive(&metadata);
        let path = directory.join(&filename);

        enter(Stage::Writing);
        self.write(draft, &path).await?;

        enter(Stage::Done);
        Ok(WrittenLetter {
            path,
            filename,
            metadata,
        })
    }

    /// Runs the blocking writer off the async runtime and enforces the no-partial-file rule.
    async fn write(&self, draft: CoverLetterDraft, path: &Path) -> Result<(), GenerationError> {
        let writer = Arc::clone(&self.writer);
        let target = path.to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<(), GenerationError> {
            let existed_before = target.exists();
            let result = writer.write(&draft.body_text, &target);

            if result.is_err() && !existed_before && target.exists() {
                if let Err(e) = std::fs::remove_file(&target) {
                    warn!("Failed to remove partial file {}: {e}", target.display());
                }
            }
            result?;

            match std::fs::metadata(&target) {
                Ok(m) if m.is_file() && m.len() > 0 => Ok(()),
                _ => Err(GenerationError::Io(format!(
                    "writer reported success but no file exists at {}",
                    target.display()
                ))),
            }
        })
        .await
        .map_err(|e| GenerationError::Io(format!("PDF writer task failed: {e}")))?
    }
}

fn enter(stage: Stage) {
    info!(%stage, "pipeline stage");
}
