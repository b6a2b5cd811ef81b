//! Metadata Extractor — pulls company, title, abbreviation and job ID out of a raw job description.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::generation::error::GenerationError;
use crate::generation::filename::{normalize_segment, PLACEHOLDER};
use crate::generation::prompts::{metadata_system, METADATA_PROMPT_TEMPLATE};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{call_json, LanguageModel};

/// Words skipped when building an abbreviation from title initials.
const FILLER_WORDS: &[&str] = &[
    "a", "an", "and", "the", "of", "for", "to", "in", "at", "with", "&",
];

/// Hex digits of the description digest used as a synthesized job ID.
const SYNTHETIC_ID_LEN: usize = 8;

/// Structured fields extracted from one job description.
/// Every field is non-empty once `extract` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobMetadata {
    pub company_name: String,
    pub job_title: String,
    pub job_title_abbreviation: String,
    pub job_id: String,
}

/// The model's reply, before fallbacks are applied.
/// `company_name` and `job_title` are required; a reply without them fails deserialization.
#[derive(Debug, Deserialize)]
struct ExtractedMetadata {
    company_name: String,
    job_title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    job_title_abbreviation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    job_id: Option<String>,
}

/// Accepts a string, a number, or null. Placeholder strings ("null", "N/A", ...) become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let text = match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Null) | None => return Ok(None),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected string or number, got {other}"
            )))
        }
    };
    let trimmed = text.trim();
    let is_placeholder = trimmed.is_empty()
        || ["null", "none", "n/a", "na", "unknown"]
            .iter()
            .any(|p| trimmed.eq_ignore_ascii_case(p));
    Ok((!is_placeholder).then(|| trimmed.to_string()))
}

/// Extracts `JobMetadata` from a job description with one constrained LLM call.
pub async fn extract(
    job_description: &str,
    llm: &dyn LanguageModel,
) -> Result<JobMetadata, GenerationError> {
    if job_description.trim().is_empty() {
        return Err(GenerationError::InvalidInput(
            "job description cannot be empty".to_string(),
        ));
    }

    let prompt = fill_template(METADATA_PROMPT_TEMPLATE, &[("jd_text", job_description)]);
    let extracted: ExtractedMetadata = call_json(llm, &prompt, &metadata_system())
        .await
        .map_err(|e| GenerationError::from_llm("metadata extraction", e))?;

    let metadata = finalize(extracted, job_description);
    info!(
        "Extracted metadata: company={:?} title={:?} abbreviation={:?} job_id={:?}",
        metadata.company_name, metadata.job_title, metadata.job_title_abbreviation, metadata.job_id
    );
    Ok(metadata)
}

/// Applies the abbreviation and job ID fallbacks to the model's reply.
fn finalize(extracted: ExtractedMetadata, job_description: &str) -> JobMetadata {
    // An abbreviation with nothing filename-safe in it counts as omitted.
    let job_title_abbreviation = extracted
        .job_title_abbreviation
        .filter(|abbreviation| normalize_segment(abbreviation) != PLACEHOLDER)
        .unwrap_or_else(|| {
            debug!("No usable job_title_abbreviation; using title initials");
            title_initials(&extracted.job_title)
        });

    let job_id = extracted.job_id.unwrap_or_else(|| {
        debug!("No job ID in posting; synthesizing from description digest");
        synthesize_job_id(job_description)
    });

    JobMetadata {
        company_name: extracted.company_name.trim().to_string(),
        job_title: extracted.job_title.trim().to_string(),
        job_title_abbreviation,
        job_id,
    }
}

/// Uppercased initials of the significant words in `title`.
/// "Head of Machine Learning" → "HML".
pub fn title_initials(title: &str) -> String {
    title
        .split_whitespace()
        .filter(|word| !FILLER_WORDS.iter().any(|f| word.eq_ignore_ascii_case(f)))
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .collect()
}

/// A stable, filename-safe identifier derived from the description text.
pub fn synthesize_job_id(job_description: &str) -> String {
    let digest = format!("{:x}", md5::compute(job_description.trim().as_bytes()));
    digest[..SYNTHETIC_ID_LEN].to_string()
}
