//! Generate Command
//!
//! Reads a user story from stdin, asks the completion API for a full test
//! design and writes it as a PDF.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use storycase_common::intake::END_MARKER;
use storycase_common::{generate_design, read_story, write_pdf, GeneratorConfig, OpenAiClient};

use super::{case_rows, warn_unconventional};
use crate::output::{print_info, print_list, print_success, OutputFormat};

/// Sampling temperature when neither a flag nor a config file sets one.
pub const CLI_TEMPERATURE: f32 = storycase_common::config::DEFAULT_TEMPERATURE;

/// Default PDF path
pub const DEFAULT_OUTPUT: &str = "testcases.pdf";

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Where to write the PDF
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model name (overrides config and STORYCASE_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,
}

/// Build the generator config: the config file (or the environment alone),
/// then command-line flags on top.
pub fn resolve_config(config_path: Option<&Path>, args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match config_path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GeneratorConfig::from_env().with_temperature(CLI_TEMPERATURE),
    };
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(temperature) = args.temperature {
        config.temperature = temperature;
    }
    Ok(config)
}

fn print_instructions() {
    eprintln!("{}", "Paste your User Story below.".bold());
    eprintln!("Optional: add Acceptance Criteria on new lines starting with 'AC:'.");
    eprintln!("When done, type a single line: {} and press Enter.", END_MARKER.cyan());
    eprintln!("{}", "-".repeat(54).dimmed());
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub async fn execute(args: GenerateArgs, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = resolve_config(config_path, &args)?;
    let output = args.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        print_instructions();
    }
    let Some(payload) = read_story(stdin.lock())? else {
        anyhow::bail!("No input provided. Paste the User Story, then type {} on a new line.", END_MARKER);
    };
    debug!(
        "story read with {} acceptance criteria",
        payload.acceptance_criteria.len()
    );

    let max_retries = config.max_retries;
    let generated = match OpenAiClient::new(config) {
        Ok(client) => {
            let progress = spinner(&format!("Generating test design with {}", client.config().model));
            let result = generate_design(&client, &payload, max_retries).await;
            progress.finish_and_clear();
            result
        }
        Err(e) => Err(e),
    };
    let design = match generated {
        Ok(design) => design,
        Err(e) => {
            print_info("Provide a JSON file matching the schema and run `storycase render <FILE>` to format it.");
            return Err(anyhow::Error::new(e).context("Generation unavailable"));
        }
    };

    write_pdf(&output, &payload.user_story, &payload.acceptance_criteria, &design)
        .with_context(|| format!("Failed to write PDF to {}", output.display()))?;

    warn_unconventional(&design.test_cases);
    print_list(&case_rows(&design.test_cases), format);
    print_success(&format!("PDF saved as {}", output.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storycase.toml");
        std::fs::write(&path, "model = \"from-file\"\ntemperature = 0.7\nmax_retries = 4\n").unwrap();

        let args = GenerateArgs {
            model: Some("from-flag".to_string()),
            ..Default::default()
        };
        let config = resolve_config(Some(&path), &args).unwrap();
        assert_eq!(config.model, "from-flag");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_retries, 4);

        let args = GenerateArgs {
            temperature: Some(0.3),
            ..Default::default()
        };
        assert_eq!(resolve_config(Some(&path), &args).unwrap().temperature, 0.3);
    }

    #[test]
    fn test_default_temperature_without_config_file() {
        let config = resolve_config(None, &GenerateArgs::default()).unwrap();
        assert_eq!(config.temperature, CLI_TEMPERATURE);
    }

    #[test]
    fn test_config_file_without_temperature_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storycase.toml");
        std::fs::write(&path, "model = \"m\"\n").unwrap();

        let config = resolve_config(Some(&path), &GenerateArgs::default()).unwrap();
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.temperature, CLI_TEMPERATURE);
    }

    #[test]
    fn test_bad_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "max_retries = \"many\"").unwrap();
        let err = resolve_config(Some(&path), &GenerateArgs::default()).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
