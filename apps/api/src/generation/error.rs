//! Failure taxonomy for the cover-letter pipeline.

use serde::Serialize;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::PdfError;

/// Stable, machine-readable code for each failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    NoResumeSet,
    SaveLocationInvalid,
    LlmUnavailable,
    LlmMalformedResponse,
    IoError,
}

/// Every way a pipeline stage (or a state update) can fail.
/// Each variant carries the human-readable reason surfaced to callers.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resume not set. Submit a resume before generating a cover letter.")]
    NoResumeSet,

    #[error("Save location invalid: {0}")]
    SaveLocationInvalid(String),

    #[error("Language model unavailable: {0}")]
    LlmUnavailable(String),

    #[error("Language model returned a malformed response: {0}")]
    LlmMalformedResponse(String),

    #[error("Failed to write cover letter: {0}")]
    Io(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::InvalidInput(_) => ErrorKind::InvalidInput,
            GenerationError::NoResumeSet => ErrorKind::NoResumeSet,
            GenerationError::SaveLocationInvalid(_) => ErrorKind::SaveLocationInvalid,
            GenerationError::LlmUnavailable(_) => ErrorKind::LlmUnavailable,
            GenerationError::LlmMalformedResponse(_) => ErrorKind::LlmMalformedResponse,
            GenerationError::Io(_) => ErrorKind::IoError,
        }
    }

    /// Maps a language-model failure into the taxonomy, prefixed with the stage that hit it.
    pub fn from_llm(stage: &str, err: LlmError) -> Self {
        match err {
            LlmError::Parse(_) | LlmError::EmptyContent => {
                GenerationError::LlmMalformedResponse(format!("{stage}: {err}"))
            }
            LlmError::Http(_) | LlmError::Api { .. } | LlmError::RateLimited { .. } => {
                GenerationError::LlmUnavailable(format!("{stage}: {err}"))
            }
        }
    }
}

impl From<PdfError> for GenerationError {
    fn from(err: PdfError) -> Self {
        GenerationError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::LlmMalformedResponse).unwrap();
        assert_eq!(json, r#""LLM_MALFORMED_RESPONSE""#);
        let json = serde_json::to_string(&ErrorKind::NoResumeSet).unwrap();
        assert_eq!(json, r#""NO_RESUME_SET""#);
    }

    #[test]
    fn test_llm_parse_error_maps_to_malformed() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = GenerationError::from_llm("metadata extraction", LlmError::Parse(parse_err));
        assert_eq!(err.kind(), ErrorKind::LlmMalformedResponse);
        assert!(err.to_string().contains("metadata extraction"));
    }

    #[test]
    fn test_llm_api_error_maps_to_unavailable() {
        let err = GenerationError::from_llm(
            "letter composition",
            LlmError::Api {
                status: 401,
                message: "invalid x-api-key".to_string(),
            },
        );
        assert_eq!(err.kind(), ErrorKind::LlmUnavailable);
        assert!(err.to_string().contains("invalid x-api-key"));
    }

    #[test]
    fn test_pdf_error_maps_to_io() {
        let err: GenerationError = PdfError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ))
        .into();
        assert_eq!(err.kind(), ErrorKind::IoError);
    }
}
