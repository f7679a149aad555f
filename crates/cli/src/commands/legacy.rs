//! Parse-Legacy Command

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use storycase_common::{parse_legacy, TestCase};

use super::case_rows;
use crate::output::{print_list, OutputFormat};

#[derive(Args, Debug)]
pub struct ParseLegacyArgs {
    /// Text file with legacy test cases (stdin when omitted)
    pub file: Option<PathBuf>,
}

/// Read the input text from the file, or stdin.
fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

pub fn parse_input(args: &ParseLegacyArgs) -> Result<Vec<TestCase>> {
    let text = read_input(args.file.as_ref())?;
    let cases = parse_legacy(&text);
    debug!("parsed {} legacy test cases", cases.len());
    Ok(cases)
}

pub async fn execute(args: ParseLegacyArgs, format: OutputFormat) -> Result<()> {
    let cases = parse_input(&args)?;
    print_list(&case_rows(&cases), format);
    Ok(())
}
