//! Test doubles shared by the unit tests of several modules.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LanguageModel, LlmError};
use crate::render::{PdfError, PdfWriter};

pub const GOOGLE_METADATA_JSON: &str = r#"{
    "company_name": "Google",
    "job_title": "Software Engineer",
    "job_title_abbreviation": "SWE",
    "job_id": "12345"
}"#;

pub const GOOGLE_LETTER: &str = "Dear Hiring Manager,\n\n\
    I am excited to apply for the Software Engineer role at Google. \
    Over five years of backend engineering in Python have prepared me well.\n\n\
    Sincerely,\nA. Candidate";

/// A language model that replays canned replies in order and records every prompt.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Metadata reply followed by a letter reply, for the Google example posting.
    pub fn google() -> Self {
        Self::new(vec![
            Ok(GOOGLE_METADATA_JSON.to_string()),
            Ok(GOOGLE_LETTER.to_string()),
        ])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLlm {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// A writer that leaves a truncated file behind and then fails, like a crashed renderer.
#[derive(Default)]
pub struct PartialThenFailWriter {
    pub attempts: AtomicUsize,
}

impl PdfWriter for PartialThenFailWriter {
    fn write(&self, _text: &str, path: &Path) -> Result<(), PdfError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        std::fs::write(path, b"%PDF-1.5\n%partial")?;
        Err(PdfError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }
}
