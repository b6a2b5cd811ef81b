// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for metadata extraction. Append `JSON_ONLY_SYSTEM` when sending.
pub const METADATA_SYSTEM_PREAMBLE: &str = "You are an expert recruiter who reads job postings \
    and extracts the hiring company, the role title and the posting identifier.";

pub fn metadata_system() -> String {
    format!("{METADATA_SYSTEM_PREAMBLE} {JSON_ONLY_SYSTEM}")
}

/// Metadata extraction prompt template. Replace `{jd_text}` before sending.
pub const METADATA_PROMPT_TEMPLATE: &str = r#"Extract the hiring metadata from the job description below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "company_name": "Google",
  "job_title": "Software Engineer",
  "job_title_abbreviation": "SWE",
  "job_id": "12345"
}

Rules:
- company_name: the hiring company as written in the posting. Never the recruiting agency.
- job_title: the role title as written in the posting, without location or team suffixes.
- job_title_abbreviation: the common short form of the title ("Software Engineer" -> "SWE",
  "Product Manager" -> "PM", "Senior Data Scientist" -> "SDS"). Letters and digits only.
- job_id: the requisition / job / reference number if the posting states one, otherwise null.
  Do NOT invent an identifier.

JOB DESCRIPTION:
{jd_text}"#;

/// System prompt for letter composition — plain prose, no JSON.
pub const LETTER_SYSTEM: &str = "You are a professional cover letter writer. \
    Given a resume and a job description, write a compelling, personalized cover letter that \
    highlights relevant experience from the resume, addresses the key requirements of the posting, \
    shows genuine enthusiasm for the role and company, and is professional yet engaging. \
    Write 3-4 paragraphs. \
    Return ONLY the cover letter text: no subject line, no JSON, no markdown, no commentary.";

/// Letter composition prompt template.
/// Replace: {company_name}, {job_title}, {resume}, {jd_text}
pub const LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter for the {job_title} position at {company_name}.

Use ONLY facts that appear in the resume. Do not invent employers, degrees, or metrics.
Separate paragraphs with a blank line.

RESUME:
{resume}

JOB DESCRIPTION:
{jd_text}"#;
