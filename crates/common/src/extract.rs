//! Defensive JSON extraction from model replies
//!
//! Models asked for "only JSON" still wrap it in code fences or surround it
//! with prose. [`extract_json`] recovers the object when it can and falls
//! back to an empty test case list when it cannot; it never fails.

use serde_json::{json, Map, Value};
use tracing::debug;

const FENCE: &str = "```";

/// Strip a surrounding code fence (with optional language tag) from
/// already-trimmed text. Text without a leading fence is returned as is.
pub fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };

    // Drop the rest of the opening fence line (language tag). A single-line
    // reply like ```json {...}``` keeps everything after the tag word.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim_start(),
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!("direct JSON parse failed: {}", e);
            None
        }
    }
}

/// The fallback value: a design with no test cases.
pub fn empty_design_value() -> Value {
    json!({ "test_cases": [] })
}

/// Recover a JSON object from a model reply.
///
/// Tries the fence-stripped text directly, then the span from the first `{`
/// to the last `}`. Anything else yields `{"test_cases": []}`.
pub fn extract_json(reply: &str) -> Value {
    let text = strip_code_fence(reply.trim());

    if let Some(map) = parse_object(text) {
        return Value::Object(map);
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Some(map) = parse_object(&text[start..=end]) {
                return Value::Object(map);
            }
        }
    }

    debug!("no JSON object recovered from reply ({} bytes)", reply.len());
    empty_design_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const INNER: &str = r#"{"test_cases":[{"id":"TC-1","title":"Login","steps":[]}]}"#;

    #[test]
    fn test_plain_json() {
        let v = extract_json(INNER);
        assert_eq!(v["test_cases"][0]["id"], "TC-1");
    }

    #[test]
    fn test_fenced_with_language_tag_matches_inner() {
        let fenced = format!("```json\n{}\n```", INNER);
        let direct: Value = serde_json::from_str(INNER).unwrap();
        assert_eq!(extract_json(&fenced), direct);
    }

    #[test]
    fn test_fenced_without_tag_and_padding() {
        let fenced = format!("\n\n```\n  {}  \n```\n", INNER);
        let direct: Value = serde_json::from_str(INNER).unwrap();
        assert_eq!(extract_json(&fenced), direct);
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(strip_code_fence("```json {\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_prose_around_object() {
        let reply = format!("Sure! Here are your cases:\n{}\nLet me know if you need more.", INNER);
        let direct: Value = serde_json::from_str(INNER).unwrap();
        assert_eq!(extract_json(&reply), direct);
    }

    #[test]
    fn test_no_braces_yields_empty_list() {
        assert_eq!(extract_json("I cannot help with that."), empty_design_value());
        assert_eq!(extract_json(""), empty_design_value());
    }

    #[test]
    fn test_broken_object_yields_empty_list() {
        assert_eq!(extract_json("prefix { not json } suffix"), empty_design_value());
        assert_eq!(extract_json("} backwards {"), empty_design_value());
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        assert_eq!(extract_json("[1, 2, 3]"), empty_design_value());
        assert_eq!(extract_json("\"just a string\""), empty_design_value());
    }

    proptest! {
        #[test]
        fn extract_json_always_returns_object(reply in "\\PC*") {
            prop_assert!(extract_json(&reply).is_object());
        }
    }
}
