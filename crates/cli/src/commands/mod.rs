//! CLI Commands

pub mod generate;
pub mod legacy;
pub mod render;

use serde::Serialize;
use storycase_common::{CaseType, Priority, TestCase};

use crate::output::{print_warning, TableDisplay};

/// Test case display wrapper. Serializes as the case itself.
#[derive(Serialize)]
#[serde(transparent)]
pub struct CaseRow<'a>(pub &'a TestCase);

impl TableDisplay for CaseRow<'_> {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Title", "Priority", "Type", "Steps"]
    }

    fn row(&self) -> Vec<String> {
        let tc = self.0;
        let steps = tc
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if s.expected.is_empty() {
                    format!("{}. {}", i + 1, s.action)
                } else {
                    format!("{}. {} → {}", i + 1, s.action, s.expected)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        vec![
            tc.id.clone(),
            tc.title.clone(),
            Priority::parse(&tc.priority).map_or_else(|| tc.priority.clone(), |p| p.to_string()),
            CaseType::parse(&tc.case_type).map_or_else(|| tc.case_type.clone(), |t| t.to_string()),
            steps,
        ]
    }
}

/// Priorities and types outside the conventional vocabularies, one
/// description per offending field. Blank fields are not reported.
pub fn unconventional_labels(cases: &[TestCase]) -> Vec<String> {
    let mut found = Vec::new();
    for tc in cases {
        let priority = tc.priority.trim();
        if !priority.is_empty() && !Priority::is_known(priority) {
            found.push(format!("{} has unusual priority '{}'", tc.id, priority));
        }
        let case_type = tc.case_type.trim();
        if !case_type.is_empty() && !CaseType::is_known(case_type) {
            found.push(format!("{} has unusual type '{}'", tc.id, case_type));
        }
    }
    found
}

/// Warn about labels the summary table will show verbatim.
pub fn warn_unconventional(cases: &[TestCase]) {
    for label in unconventional_labels(cases) {
        print_warning(&label);
    }
}

/// Wrap cases for display.
pub fn case_rows(cases: &[TestCase]) -> Vec<CaseRow<'_>> {
    cases.iter().map(CaseRow).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storycase_common::TestStep;

    #[test]
    fn test_case_row() {
        let mut tc = TestCase::new("TC-1", "Login");
        tc.steps.push(TestStep::new("Open page", "Form shown"));
        tc.steps.push(TestStep::new("Wait", ""));

        let row = CaseRow(&tc).row();
        assert_eq!(row[0], "TC-1");
        assert_eq!(row[4], "1. Open page → Form shown\n2. Wait");

        let json = serde_json::to_value(CaseRow(&tc)).unwrap();
        assert_eq!(json["steps"][0]["step"], "Open page");
    }

    #[test]
    fn test_case_row_canonical_labels() {
        let mut tc = TestCase::new("TC-2", "Search");
        tc.priority = "high".to_string();
        tc.case_type = " negative ".to_string();
        let row = CaseRow(&tc).row();
        assert_eq!(row[2], "High");
        assert_eq!(row[3], "Negative");

        tc.priority = "Urgent".to_string();
        assert_eq!(CaseRow(&tc).row()[2], "Urgent");
    }

    #[test]
    fn test_unconventional_labels() {
        let mut known = TestCase::new("TC-1", "a");
        known.priority = "Low".to_string();
        known.case_type = "Security".to_string();
        let mut odd = TestCase::new("TC-2", "b");
        odd.priority = "Urgent".to_string();
        odd.case_type = "Smoke".to_string();
        let blank = TestCase::new("TC-3", "c");

        let found = unconventional_labels(&[known, odd, blank]);
        assert_eq!(
            found,
            vec![
                "TC-2 has unusual priority 'Urgent'".to_string(),
                "TC-2 has unusual type 'Smoke'".to_string(),
            ]
        );
    }
}
