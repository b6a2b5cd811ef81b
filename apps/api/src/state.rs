use crate::generation::pipeline::CoverLetterPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the session slots plus the injected language model and PDF writer.
    pub pipeline: CoverLetterPipeline,
}
