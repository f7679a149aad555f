//! System prompts for the completion API

use once_cell::sync::Lazy;

use crate::types::{alternatives, CaseType, Priority};

fn test_case_schema(indent: &str) -> String {
    format!(
        r#"{indent}{{
{indent}  "id": "TC-1",
{indent}  "title": "string",
{indent}  "priority": "{priorities}",
{indent}  "type": "{types}",
{indent}  "steps": [
{indent}    {{"step": "concise action", "expected": "concise observable result"}}
{indent}  ]
{indent}}}"#,
        indent = indent,
        priorities = alternatives(&Priority::ALL),
        types = alternatives(&CaseType::ALL),
    )
}

/// Prompt for the web form: test cases only.
pub static CASES_SYSTEM_PROMPT: Lazy<String> = Lazy::new(|| {
    format!(
        r#"You are a senior test engineer.
Return ONLY valid JSON (no markdown, no prose).
Schema:
{{
  "test_cases": [
{schema}
  ]
}}
Rules:
- Provide 3-6 focused test cases.
- Each test case MUST have at least 3 steps, each with 'step' and 'expected'.
- Be concise and testable. No Gherkin."#,
        schema = test_case_schema("    "),
    )
});

/// Prompt for the terminal flow: the full design document.
pub static DESIGN_SYSTEM_PROMPT: Lazy<String> = Lazy::new(|| {
    format!(
        r#"You are a senior test engineer.
Return ONLY valid JSON with this schema:

{{
  "metadata": {{"source_id": "string"}},
  "design": {{
    "equivalence_classes": ["string", ...],
    "boundary_values": ["string", ...],
    "negative_cases": ["string", ...]
  }},
  "traceability": [
    {{"criterion": "string", "covered_by": ["TC-1", "TC-2", "..."]}}
  ],
  "test_cases": [
{schema}
  ]
}}

Rules:
- Provide 3-6 focused test cases.
- Each test case MUST have at least 3 steps; every step has both 'step' and 'expected'.
- Be concise and testable. No Gherkin. No markdown. No code fences."#,
        schema = test_case_schema("    "),
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_list_vocabularies() {
        for prompt in [&*CASES_SYSTEM_PROMPT, &*DESIGN_SYSTEM_PROMPT] {
            assert!(prompt.contains("High|Medium|Low"));
            assert!(prompt.contains("Functional|Negative|Boundary|Security|Performance|Usability"));
            assert!(prompt.contains("\"test_cases\""));
        }
        assert!(DESIGN_SYSTEM_PROMPT.contains("\"traceability\""));
        assert!(!CASES_SYSTEM_PROMPT.contains("\"traceability\""));
    }
}
