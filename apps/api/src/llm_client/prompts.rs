// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Single repair attempt for output that failed schema validation.
/// Replace: {parse_error}, {original_prompt}, {invalid_output}
pub const REPAIR_PROMPT_TEMPLATE: &str = r#"Your previous reply could not be parsed against the required JSON schema.

Parse error: {parse_error}

The original request was:
---
{original_prompt}
---

Your previous reply was:
---
{invalid_output}
---

Reply again with ONLY the corrected JSON object that satisfies the schema in the original request."#;

/// Substitutes `{key}` placeholders in one left-to-right pass.
/// Inserted values are never re-scanned, and unknown `{...}` text is kept as is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let substitution = tail[1..].find('}').and_then(|end| {
            let key = &tail[1..1 + end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end + 2))
        });

        match substitution {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
