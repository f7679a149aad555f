//! Storycase Common Library
//!
//! Test design schema, legacy text parsing, reply normalization, the
//! completion client and the PDF renderer shared by the web form and the
//! terminal tool.

pub mod config;
pub mod error;
pub mod extract;
pub mod intake;
pub mod legacy;
pub mod llm;
pub mod normalize;
pub mod pdf;
pub mod prompts;
pub mod types;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use extract::extract_json;
pub use intake::{read_story, StoryPayload, StoryRequest};
pub use legacy::parse_legacy;
pub use llm::{generate_cases, generate_design, CompletionClient, OpenAiClient};
pub use normalize::{normalize_cases, normalize_design};
pub use pdf::{render_pdf, write_pdf};
pub use types::*;

/// Storycase version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
