//! Legacy test case text parser
//!
//! Recovers structured test cases from the free-text format older
//! generations produced, e.g.
//!
//! ```text
//! TC-1 — Login succeeds
//! 1. Enter valid credentials
//! -> User is redirected to dashboard
//! ```
//!
//! Every non-blank line is classified by the first rule that matches:
//! case header, numbered step, `->` expected result, or continuation text.
//! Nothing is ever rejected; lines that cannot be attached anywhere are
//! dropped so that arbitrary pasted text still yields a document.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::types::{assign_missing_ids, TestCase, TestStep};

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(TC[-\s]*\d+)\s+[-–—]\s+(.+)$").expect("valid header regex"));
static STEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*(.+)$").expect("valid step regex"));
static EXPECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:->|→)\s*(.+)$").expect("valid expected regex"));

/// Id given to a case that is opened implicitly by a step line.
const IMPLICIT_CASE_ID: &str = "TC-1";

/// Classification of a single trimmed, non-blank line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Header { id: String, title: &'a str },
    Step(&'a str),
    Expected(&'a str),
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = HEADER_RE.captures(line) {
        let id = caps[1].split_whitespace().collect::<String>();
        let title = caps.get(2).map_or("", |m| m.as_str().trim());
        return Line::Header { id, title };
    }
    if let Some(m) = STEP_RE.captures(line).and_then(|c| c.get(1)) {
        return Line::Step(m.as_str().trim());
    }
    if let Some(m) = EXPECT_RE.captures(line).and_then(|c| c.get(1)) {
        return Line::Expected(m.as_str().trim());
    }
    Line::Text(line)
}

/// Line-at-a-time parser state: the finished cases plus the one still open.
#[derive(Debug, Default)]
struct LegacyParser {
    cases: Vec<TestCase>,
    open: Option<TestCase>,
}

impl LegacyParser {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        match classify(line) {
            Line::Header { id, title } => {
                self.close();
                self.open = Some(TestCase::new(id, title));
            }
            Line::Step(action) => {
                self.open
                    .get_or_insert_with(|| TestCase::new(IMPLICIT_CASE_ID, ""))
                    .steps
                    .push(TestStep::new(action, ""));
            }
            Line::Expected(text) => match self.last_step() {
                Some(step) => append(&mut step.expected, text),
                None => trace!("dropping expected result with no step: {}", text),
            },
            Line::Text(text) => match self.last_step() {
                Some(step) if step.expected.is_empty() => append(&mut step.action, text),
                Some(step) => append(&mut step.expected, text),
                None => trace!("dropping unattached line: {}", text),
            },
        }
    }

    fn last_step(&mut self) -> Option<&mut TestStep> {
        self.open.as_mut().and_then(|tc| tc.steps.last_mut())
    }

    fn close(&mut self) {
        if let Some(tc) = self.open.take() {
            self.cases.push(tc);
        }
    }

    fn finish(mut self) -> Vec<TestCase> {
        self.close();
        assign_missing_ids(&mut self.cases);
        self.cases
    }
}

fn append(field: &mut String, text: &str) {
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(text);
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every Unicode line boundary, treating `\r\n` as one break.
fn split_lines(blob: &str) -> impl Iterator<Item = &str> {
    let mut rest = blob;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|(_, c)| is_line_break(*c)) {
            Some((i, c)) => {
                let line = &rest[..i];
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { c.len_utf8() };
                rest = &rest[i + skip..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}

/// Parse a legacy test case blob. Total over all inputs; the empty string
/// yields no cases.
pub fn parse_legacy(blob: &str) -> Vec<TestCase> {
    let mut parser = LegacyParser::default();
    for line in split_lines(blob) {
        parser.feed(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_legacy("").is_empty());
        assert!(parse_legacy("  \n\n\t\n").is_empty());
    }

    #[test]
    fn test_login_example() {
        let blob = "TC-1 — Login succeeds\n\
                    1. Enter valid credentials\n\
                    -> User is redirected to dashboard\n\
                    2. Check welcome banner\n\
                    -> Banner shows the user's name\n";
        let cases = parse_legacy(blob);
        assert_eq!(cases.len(), 1);
        let tc = &cases[0];
        assert_eq!(tc.id, "TC-1");
        assert_eq!(tc.title, "Login succeeds");
        assert_eq!(tc.priority, "");
        assert_eq!(tc.case_type, "");
        assert_eq!(
            tc.steps,
            vec![
                TestStep::new("Enter valid credentials", "User is redirected to dashboard"),
                TestStep::new("Check welcome banner", "Banner shows the user's name"),
            ]
        );
    }

    #[test]
    fn test_header_variants() {
        assert_eq!(
            classify("TC 12 - Reset password"),
            Line::Header { id: "TC12".to_string(), title: "Reset password" }
        );
        assert_eq!(
            classify("TC-3 – Logout"),
            Line::Header { id: "TC-3".to_string(), title: "Logout" }
        );
        // no whitespace around the separator: not a header
        assert_eq!(classify("TC-3—Logout"), Line::Text("TC-3—Logout"));
    }

    #[test]
    fn test_step_before_header_opens_implicit_case() {
        let cases = parse_legacy("1. Open the app\n-> Splash screen shows");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, "TC-1");
        assert_eq!(cases[0].title, "");
        assert_eq!(cases[0].steps[0], TestStep::new("Open the app", "Splash screen shows"));
    }

    #[test]
    fn test_consecutive_expected_lines_are_joined() {
        let cases = parse_legacy("TC-1 — A\n1. Do it\n-> First\n-> Second");
        assert_eq!(cases[0].steps[0].expected, "First Second");
    }

    #[test]
    fn test_lone_header_keeps_empty_case() {
        let cases = parse_legacy("TC-7 — Nothing yet");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, "TC-7");
        assert_eq!(cases[0].title, "Nothing yet");
        assert!(cases[0].steps.is_empty());
    }

    #[test]
    fn test_continuation_lines() {
        let blob = "TC-1 — Wrap\n\
                    1. Fill the form with\n\
                    \x20\x20a very long name\n\
                    -> The form\n\
                    accepts it";
        let cases = parse_legacy(blob);
        assert_eq!(
            cases[0].steps[0],
            TestStep::new("Fill the form with a very long name", "The form accepts it")
        );
    }

    #[test]
    fn test_unattached_lines_are_dropped() {
        let blob = "Some preamble\n-> orphan expectation\nTC-2 — Real\n-> still orphan\n1. Step";
        let cases = parse_legacy(blob);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, "TC-2");
        assert_eq!(cases[0].steps, vec![TestStep::new("Step", "")]);
    }

    #[test]
    fn test_multiple_cases_keep_order() {
        let blob = "TC-1 — First\n1. a\nTC-2 — Second\nTC-3 — Third\n1. b\n2. c";
        let cases = parse_legacy(blob);
        let ids: Vec<_> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["TC-1", "TC-2", "TC-3"]);
        assert!(cases[1].steps.is_empty());
        let actions: Vec<_> = cases[2].steps.iter().map(|s| s.action.as_str()).collect();
        assert_eq!(actions, ["b", "c"]);
    }

    proptest! {
        #[test]
        fn parse_legacy_is_total(blob in "\\PC*") {
            for tc in parse_legacy(&blob) {
                prop_assert!(!tc.id.is_empty());
            }
        }

        #[test]
        fn steps_keep_declaration_order(actions in proptest::collection::vec("[a-z][a-z ]{0,16}[a-z]", 1..12)) {
            let mut blob = String::from("TC-1 — Ordering\n");
            for (i, action) in actions.iter().enumerate() {
                blob.push_str(&format!("{}. {}\n", i + 1, action));
            }
            let cases = parse_legacy(&blob);
            prop_assert_eq!(cases.len(), 1);
            let parsed: Vec<String> = cases[0].steps.iter().map(|s| s.action.clone()).collect();
            prop_assert_eq!(parsed, actions);
        }
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let cases = parse_legacy("TC-1 - Login\r1. Open page\r-> Form shown");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].title, "Login");
        assert_eq!(cases[0].steps, vec![TestStep::new("Open page", "Form shown")]);

        let crlf = parse_legacy("TC-1 - Login\r\n1. Open page\r\n-> Form shown\r\n");
        assert_eq!(crlf, cases);
    }

    #[test]
    fn test_split_lines_boundaries() {
        let lines: Vec<&str> = split_lines("a\u{2028}b\x0cc\r\nd\re\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\n\n").collect::<Vec<_>>(), vec!["", ""]);
    }
}
