//! Letter Composer — writes the cover-letter prose from resume, posting and extracted metadata.

use serde::Serialize;
use tracing::info;

use crate::generation::error::GenerationError;
use crate::generation::metadata::JobMetadata;
use crate::generation::prompts::{LETTER_PROMPT_TEMPLATE, LETTER_SYSTEM};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{LanguageModel, LlmError};

/// Cover-letter body exactly as the model wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverLetterDraft {
    pub body_text: String,
}

/// Composes a cover letter with a single LLM call. The reply is not trimmed or edited.
pub async fn compose(
    resume: &str,
    job_description: &str,
    metadata: &JobMetadata,
    llm: &dyn LanguageModel,
) -> Result<CoverLetterDraft, GenerationError> {
    if resume.trim().is_empty() {
        return Err(GenerationError::NoResumeSet);
    }
    if job_description.trim().is_empty() {
        return Err(GenerationError::InvalidInput(
            "job description cannot be empty".to_string(),
        ));
    }

    let prompt = fill_template(
        LETTER_PROMPT_TEMPLATE,
        &[
            ("company_name", &metadata.company_name),
            ("job_title", &metadata.job_title),
            ("resume", resume),
            ("jd_text", job_description),
        ],
    );

    let body_text = llm
        .complete(&prompt, LETTER_SYSTEM)
        .await
        .map_err(|e| GenerationError::from_llm("letter composition", e))?;

    if body_text.trim().is_empty() {
        return Err(GenerationError::from_llm(
            "letter composition",
            LlmError::EmptyContent,
        ));
    }

    info!("Composed cover letter ({} chars)", body_text.len());
    Ok(CoverLetterDraft { body_text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::error::ErrorKind;
    use crate::test_support::{ScriptedLlm, GOOGLE_LETTER};

    fn google_metadata() -> JobMetadata {
        JobMetadata {
            company_name: "Google".to_string(),
            job_title: "Software Engineer".to_string(),
            job_title_abbreviation: "SWE".to_string(),
            job_id: "12345".to_string(),
        }
    }

    #[tokio::test]
    async fn test_compose_passes_reply_through_unmodified() {
        let reply = format!("\n{GOOGLE_LETTER}\n\n");
        let llm = ScriptedLlm::new(vec![Ok(reply.clone())]);

        let draft = compose(
            "Experienced backend engineer, 5 years Python.",
            "Software Engineer role at Google, job ID 12345.",
            &google_metadata(),
            &llm,
        )
        .await
        .unwrap();

        assert_eq!(draft.body_text, reply);
    }

    #[tokio::test]
    async fn test_compose_prompt_carries_resume_posting_and_metadata() {
        let llm = ScriptedLlm::new(vec![Ok(GOOGLE_LETTER.to_string())]);
        compose(
            "Experienced backend engineer, 5 years Python.",
            "Software Engineer role at Google, job ID 12345.",
            &google_metadata(),
            &llm,
        )
        .await
        .unwrap();

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Experienced backend engineer, 5 years Python."));
        assert!(prompt.contains("job ID 12345"));
        assert!(prompt.contains("Software Engineer position at Google"));
    }

    #[tokio::test]
    async fn test_compose_keeps_braces_in_resume_literal() {
        let llm = ScriptedLlm::new(vec![Ok(GOOGLE_LETTER.to_string())]);
        compose(
            "Wrote templates like {jd_text} and {company_name}",
            "Role at Google",
            &google_metadata(),
            &llm,
        )
        .await
        .unwrap();

        assert!(llm.prompts()[0].contains("Wrote templates like {jd_text} and {company_name}"));
    }

    #[tokio::test]
    async fn test_compose_keeps_braces_in_posting_and_metadata_literal() {
        let llm = ScriptedLlm::new(vec![Ok(GOOGLE_LETTER.to_string())]);
        let metadata = JobMetadata {
            company_name: "Acme {jd_text}".to_string(),
            job_title: "Template {resume} Engineer".to_string(),
            ..google_metadata()
        };
        compose(
            "SECRET_RESUME_BODY",
            "Template role: use {resume} syntax",
            &metadata,
            &llm,
        )
        .await
        .unwrap();

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Template role: use {resume} syntax"));
        assert!(prompt.contains("Template {resume} Engineer position at Acme {jd_text}"));
        assert_eq!(prompt.matches("SECRET_RESUME_BODY").count(), 1);
        assert_eq!(prompt.matches("Template role").count(), 1);
    }

    #[tokio::test]
    async fn test_compose_blank_resume_is_no_resume_set() {
        let llm = ScriptedLlm::new(vec![]);
        let err = compose(" ", "Role at Google", &google_metadata(), &llm)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoResumeSet);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_compose_blank_reply_is_malformed() {
        let llm = ScriptedLlm::new(vec![Ok("  \n".to_string())]);
        let err = compose("Resume", "Role at Google", &google_metadata(), &llm)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LlmMalformedResponse);
    }

    #[tokio::test]
    async fn test_compose_transport_failure_is_unavailable() {
        let llm = ScriptedLlm::new(vec![Err(LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        })]);
        let err = compose("Resume", "Role at Google", &google_metadata(), &llm)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LlmUnavailable);
    }
}
