//! Schema normalization for loosely shaped JSON
//!
//! Model replies and hand-written design files do not always follow the
//! schema exactly: steps arrive as bare strings, ids as numbers, lists as
//! single values. Everything here coerces instead of failing, so the
//! renderer only ever sees the types in [`crate::types`].

use serde_json::Value;
use tracing::debug;

use crate::legacy::parse_legacy;
use crate::types::{
    assign_missing_ids, DesignNotes, Metadata, TestCase, TestDesign, TestStep, TraceabilityEntry,
};

/// Coerce a scalar JSON value to text. Strings are trimmed; numbers and
/// booleans use their JSON spelling; anything else is empty.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| text(Some(v)))
            .filter(|s| !s.is_empty())
            .collect(),
        Some(v) => {
            let single = text(Some(v));
            if single.is_empty() {
                Vec::new()
            } else {
                vec![single]
            }
        }
        None => Vec::new(),
    }
}

/// Normalize one step entry: a mapping contributes its `step` and
/// `expected` fields, a bare value becomes the action.
pub fn normalize_step(value: &Value) -> TestStep {
    match value {
        Value::Object(map) => TestStep::new(text(map.get("step")), text(map.get("expected"))),
        Value::String(s) => TestStep::new(s.as_str(), ""),
        Value::Null => TestStep::default(),
        other => TestStep::new(other.to_string(), ""),
    }
}

/// Normalize one test case entry. Entries that are not mappings are
/// skipped.
pub fn normalize_case(value: &Value) -> Option<TestCase> {
    let map = value.as_object()?;
    let steps = match map.get("steps") {
        Some(Value::Array(items)) => items.iter().map(normalize_step).collect(),
        _ => Vec::new(),
    };
    Some(TestCase {
        id: text(map.get("id")),
        title: text(map.get("title")),
        priority: text(map.get("priority")),
        case_type: text(map.get("type")),
        steps,
    })
}

/// Normalize a `test_cases` list. Anything but an array yields no cases.
pub fn normalize_cases(value: Option<&Value>) -> Vec<TestCase> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut cases: Vec<TestCase> = items
        .iter()
        .filter_map(|item| {
            let tc = normalize_case(item);
            if tc.is_none() {
                debug!("skipping test case entry that is not an object: {}", item);
            }
            tc
        })
        .collect();
    assign_missing_ids(&mut cases);
    cases
}

/// Normalize a whole design document.
///
/// When `test_cases` is missing or empty and the document carries a legacy
/// `testcases` text blob, the blob is parsed instead.
pub fn normalize_design(value: &Value) -> TestDesign {
    let metadata = value.get("metadata").and_then(Value::as_object).map(|m| {
        let source_id = text(m.get("source_id"));
        Metadata {
            source_id: (!source_id.is_empty()).then_some(source_id),
        }
    });

    let design = value
        .get("design")
        .and_then(Value::as_object)
        .map(|d| DesignNotes {
            equivalence_classes: text_list(d.get("equivalence_classes")),
            boundary_values: text_list(d.get("boundary_values")),
            negative_cases: text_list(d.get("negative_cases")),
        });

    let traceability = value
        .get("traceability")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(|e| TraceabilityEntry {
                    criterion: text(e.get("criterion")),
                    covered_by: text_list(e.get("covered_by")),
                })
                .collect()
        });

    let mut test_cases = normalize_cases(value.get("test_cases"));
    if test_cases.is_empty() {
        if let Some(blob) = value.get("testcases").and_then(Value::as_str) {
            debug!("no structured test cases, parsing legacy blob");
            test_cases = parse_legacy(blob);
        }
    }

    TestDesign {
        metadata,
        design,
        traceability,
        test_cases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_shapes() {
        assert_eq!(
            normalize_step(&json!({"step": "  Click  ", "expected": " Done "})),
            TestStep::new("Click", "Done")
        );
        assert_eq!(normalize_step(&json!({"step": "Only action"})), TestStep::new("Only action", ""));
        assert_eq!(normalize_step(&json!({})), TestStep::default());
        assert_eq!(normalize_step(&json!("Bare text")), TestStep::new("Bare text", ""));
        assert_eq!(normalize_step(&json!(42)), TestStep::new("42", ""));
    }

    #[test]
    fn test_cases_skip_non_objects_and_fill_ids() {
        let value = json!([
            {"title": "No id", "steps": ["a", {"step": "b", "expected": "c"}]},
            "garbage",
            {"id": 7, "title": "Numeric id", "priority": "High", "type": "Negative"},
        ]);
        let cases = normalize_cases(Some(&value));
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].id, "TC-1");
        assert_eq!(
            cases[0].steps,
            vec![TestStep::new("a", ""), TestStep::new("b", "c")]
        );
        assert_eq!(cases[1].id, "7");
        assert_eq!(cases[1].priority, "High");
        assert_eq!(cases[1].case_type, "Negative");
        assert!(cases[1].steps.is_empty());
    }

    #[test]
    fn test_cases_not_an_array() {
        assert!(normalize_cases(None).is_empty());
        assert!(normalize_cases(Some(&json!({"id": "TC-1"}))).is_empty());
    }

    #[test]
    fn test_full_design() {
        let value = json!({
            "metadata": {"source_id": "US-42"},
            "design": {
                "equivalence_classes": ["valid email", "invalid email"],
                "boundary_values": "max length 254",
                "negative_cases": []
            },
            "traceability": [
                {"criterion": "AC1", "covered_by": ["TC-1", "TC-2"]},
                "not an entry"
            ],
            "test_cases": [{"id": "TC-1", "title": "Valid login", "steps": []}]
        });
        let design = normalize_design(&value);
        assert_eq!(design.source_id(), Some("US-42"));
        let notes = design.design.unwrap();
        assert_eq!(notes.equivalence_classes.len(), 2);
        assert_eq!(notes.boundary_values, vec!["max length 254".to_string()]);
        assert!(notes.negative_cases.is_empty());
        let trace = design.traceability.unwrap();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].covered_by, vec!["TC-1".to_string(), "TC-2".to_string()]);
        assert_eq!(design.test_cases.len(), 1);
    }

    #[test]
    fn test_missing_sections_stay_none() {
        let design = normalize_design(&json!({"test_cases": []}));
        assert!(design.metadata.is_none());
        assert!(design.design.is_none());
        assert!(design.traceability.is_none());
        assert!(design.test_cases.is_empty());
    }

    #[test]
    fn test_legacy_blob_fallback() {
        let value = json!({
            "testcases": "TC-1 — Legacy\n1. Do a thing\n-> It happens"
        });
        let design = normalize_design(&value);
        assert_eq!(design.test_cases.len(), 1);
        assert_eq!(design.test_cases[0].title, "Legacy");
        assert_eq!(design.test_cases[0].steps[0].expected, "It happens");
    }

    #[test]
    fn test_structured_cases_win_over_legacy_blob() {
        let value = json!({
            "test_cases": [{"id": "TC-5", "title": "Structured"}],
            "testcases": "TC-1 — Legacy"
        });
        let design = normalize_design(&value);
        assert_eq!(design.test_cases.len(), 1);
        assert_eq!(design.test_cases[0].id, "TC-5");
    }
}
