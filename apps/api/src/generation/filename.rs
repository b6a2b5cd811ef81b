//! Filename Deriver — `{company}_{abbreviation}_{job_id}.pdf`, normalized and deterministic.
//!
//! The same metadata always yields the same filename, so regenerating a letter for the
//! same posting overwrites the previous PDF.

use crate::generation::metadata::JobMetadata;

/// Substituted for any field that normalizes to nothing.
pub const PLACEHOLDER: &str = "Unknown";

/// Characters rejected by at least one mainstream filesystem.
const ILLEGAL_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

pub fn derive(metadata: &JobMetadata) -> String {
    format!(
        "{}_{}_{}.pdf",
        leading_segment(&metadata.company_name),
        normalize_segment(&metadata.job_title_abbreviation),
        normalize_segment(&metadata.job_id),
    )
}

/// Removes illegal and control characters, trims, and joins whitespace runs with `_`.
/// Whitespace controls (newline, tab) count as whitespace, not as removable controls.
pub fn normalize_segment(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|&c| c.is_whitespace() || !(c.is_control() || ILLEGAL_CHARS.contains(&c)))
        .collect();

    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");

    // A segment of only dots would turn the filename into a relative-path lookalike.
    if joined.chars().all(|c| c == '.') {
        PLACEHOLDER.to_string()
    } else {
        joined
    }
}

/// The first segment also drops leading dots so the file is never hidden.
fn leading_segment(raw: &str) -> String {
    let normalized = normalize_segment(raw);
    match normalized.trim_start_matches('.') {
        "" => PLACEHOLDER.to_string(),
        visible => visible.to_string(),
    }
}
