//! Core types for Storycase
//!
//! These types are the contract between the generation stage (LLM reply or
//! legacy text) and the PDF renderer. JSON field names follow the schema the
//! completion prompt asks for, so a model reply deserializes without renaming.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One (action, expected result) pair inside a test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    /// What the tester does
    #[serde(rename = "step", default)]
    pub action: String,
    /// The observable result
    #[serde(default)]
    pub expected: String,
}

impl TestStep {
    pub fn new(action: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            expected: expected.into(),
        }
    }
}

/// A single verifiable scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Free text; see [`Priority`] for the conventional values
    #[serde(default)]
    pub priority: String,
    /// Free text; see [`CaseType`] for the conventional values
    #[serde(rename = "type", default)]
    pub case_type: String,
    /// Execution order
    #[serde(default)]
    pub steps: Vec<TestStep>,
}

impl TestCase {
    /// Create an empty case with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Label for the originating user story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

/// Test design notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignNotes {
    #[serde(default)]
    pub equivalence_classes: Vec<String>,
    #[serde(default)]
    pub boundary_values: Vec<String>,
    #[serde(default)]
    pub negative_cases: Vec<String>,
}

/// Maps one acceptance criterion to the cases that exercise it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceabilityEntry {
    #[serde(default)]
    pub criterion: String,
    #[serde(default)]
    pub covered_by: Vec<String>,
}

/// A complete test design. Every field is optional; the renderer fills
/// placeholders for whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDesign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<DesignNotes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceability: Option<Vec<TraceabilityEntry>>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl TestDesign {
    /// A design carrying only test cases, as produced by the web flow.
    pub fn from_cases(test_cases: Vec<TestCase>) -> Self {
        Self {
            test_cases,
            ..Default::default()
        }
    }

    /// Source label, if one was provided and is not blank.
    pub fn source_id(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.source_id.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Give every case with an empty id the id `TC-<n>`, where `n` is its
/// 1-based position.
pub fn assign_missing_ids(cases: &mut [TestCase]) {
    for (i, tc) in cases.iter_mut().enumerate() {
        if tc.id.trim().is_empty() {
            tc.id = format!("TC-{}", i + 1);
        }
    }
}

/// Conventional test case priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn is_known(s: &str) -> bool {
        Self::parse(s).is_some()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conventional test case types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    Functional,
    Negative,
    Boundary,
    Security,
    Performance,
    Usability,
}

impl CaseType {
    pub const ALL: [CaseType; 6] = [
        CaseType::Functional,
        CaseType::Negative,
        CaseType::Boundary,
        CaseType::Security,
        CaseType::Performance,
        CaseType::Usability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::Functional => "Functional",
            CaseType::Negative => "Negative",
            CaseType::Boundary => "Boundary",
            CaseType::Security => "Security",
            CaseType::Performance => "Performance",
            CaseType::Usability => "Usability",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn is_known(s: &str) -> bool {
        Self::parse(s).is_some()
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join the names of a vocabulary with `|`, the way the prompt schema spells
/// alternatives.
pub fn alternatives<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}
