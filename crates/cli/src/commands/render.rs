//! Render Command
//!
//! Formats an existing test design JSON file as a PDF without calling the
//! completion API.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use storycase_common::intake::criteria_lines;
use storycase_common::{normalize_design, write_pdf};

use super::{case_rows, warn_unconventional};
use super::generate::DEFAULT_OUTPUT;
use crate::output::{print_list, print_success, print_warning, OutputFormat};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Test design JSON file
    pub file: PathBuf,

    /// Where to write the PDF
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Story text and acceptance criteria carried alongside a design.
///
/// The story comes from `user_story` or `story`; criteria come from
/// `acceptance_criteria`, either a list or one criterion per line.
pub fn story_fields(data: &Value) -> (String, Vec<String>) {
    let story = ["user_story", "story"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .trim()
        .to_string();

    let criteria = match data.get("acceptance_criteria") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(blob)) => criteria_lines(blob),
        _ => Vec::new(),
    };

    (story, criteria)
}

pub async fn execute(args: RenderArgs, format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let data: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;
    if !data.is_object() {
        anyhow::bail!("{} does not contain a JSON object", args.file.display());
    }

    let design = normalize_design(&data);
    let (story, criteria) = story_fields(&data);
    if design.test_cases.is_empty() {
        print_warning("No test cases were found; rendering placeholders.");
    }

    let output = args.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    write_pdf(&output, &story, &criteria, &design)
        .with_context(|| format!("Failed to write PDF to {}", output.display()))?;

    warn_unconventional(&design.test_cases);
    print_list(&case_rows(&design.test_cases), format);
    print_success(&format!("PDF saved as {}", output.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_story_fields() {
        let (story, criteria) = story_fields(&json!({
            "user_story": " As a user ",
            "story": "ignored",
            "acceptance_criteria": ["one", " ", 3, "two"]
        }));
        assert_eq!(story, "As a user");
        assert_eq!(criteria, vec!["one".to_string(), "two".to_string()]);

        let (story, criteria) = story_fields(&json!({
            "story": "Form story",
            "acceptance_criteria": "a\n\nb"
        }));
        assert_eq!(story, "Form story");
        assert_eq!(criteria, vec!["a".to_string(), "b".to_string()]);

        assert_eq!(story_fields(&json!({})), (String::new(), Vec::new()));
    }

    #[tokio::test]
    async fn test_render_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("design.json");
        let output = dir.path().join("out.pdf");
        std::fs::write(
            &input,
            json!({
                "metadata": {"source_id": "US-9"},
                "user_story": "As a user I want to reset my password",
                "acceptance_criteria": ["Reset link is emailed"],
                "test_cases": [{"title": "Reset", "steps": ["Request reset"]}]
            })
            .to_string(),
        )
        .unwrap();

        execute(
            RenderArgs {
                file: input,
                output: Some(output.clone()),
            },
            OutputFormat::Json,
        )
        .await
        .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_render_legacy_blob() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("legacy.json");
        let output = dir.path().join("legacy.pdf");
        std::fs::write(
            &input,
            json!({"testcases": "TC-1 - Login\n1. Open page\n-> Form shown"}).to_string(),
        )
        .unwrap();

        execute(
            RenderArgs {
                file: input,
                output: Some(output.clone()),
            },
            OutputFormat::Plain,
        )
        .await
        .unwrap();
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_render_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("list.json");
        std::fs::write(&input, "[1, 2]").unwrap();
        let result = execute(
            RenderArgs {
                file: input,
                output: Some(dir.path().join("x.pdf")),
            },
            OutputFormat::Table,
        )
        .await;
        assert!(result.is_err());
    }
}
