// Cover-letter generation: metadata extraction, letter composition, filename derivation,
// and the pipeline that sequences them into a written PDF.
// All LLM calls go through llm_client — no direct Anthropic API calls here.

pub mod composer;
pub mod error;
pub mod filename;
pub mod handlers;
pub mod metadata;
pub mod pipeline;
pub mod prompts;
