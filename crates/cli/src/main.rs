//! Storycase CLI - Main Entry Point
//!
//! Turns a user story typed at the terminal into a test design PDF, renders
//! existing design files, and converts legacy plain-text test cases.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

use commands::{generate, legacy, render};

/// Storycase - user story to test case generator
#[derive(Parser)]
#[command(name = "storycase")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML config file for the completion API
    #[arg(long, global = true, env = "STORYCASE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a story from stdin, generate a test design and write a PDF (default)
    Generate(generate::GenerateArgs),

    /// Render an existing test design JSON file to PDF
    Render(render::RenderArgs),

    /// Parse legacy plain-text test cases
    ParseLegacy(legacy::ParseLegacyArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    // Best effort: a missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Generate(generate::GenerateArgs::default()));

    let result = match command {
        Commands::Generate(args) => {
            generate::execute(args, cli.config.as_deref(), cli.format).await
        }
        Commands::Render(args) => render::execute(args, cli.format).await,
        Commands::ParseLegacy(args) => legacy::execute(args, cli.format).await,
        Commands::Version => {
            println!("Storycase CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("User story to test case generator with PDF export");
            Ok(())
        }
    };

    if let Err(e) = result {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_is_default() {
        let cli = Cli::try_parse_from(["storycase"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["storycase", "--format", "json", "render", "d.json", "-o", "x.pdf"])
            .unwrap();
        assert_eq!(cli.format, output::OutputFormat::Json);
        match cli.command {
            Some(Commands::Render(args)) => {
                assert_eq!(args.file, PathBuf::from("d.json"));
                assert_eq!(args.output, Some(PathBuf::from("x.pdf")));
            }
            _ => panic!("expected render"),
        }

        let cli = Cli::try_parse_from(["storycase", "parse-legacy", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::ParseLegacy(ref a)) if a.file.is_none()));

        let cli = Cli::try_parse_from(["storycase", "generate", "--temperature", "0.4", "--model", "m"])
            .unwrap();
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.temperature, Some(0.4));
                assert_eq!(args.model.as_deref(), Some("m"));
            }
            _ => panic!("expected generate"),
        }
    }
}
