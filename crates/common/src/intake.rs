//! User story intake
//!
//! Builds the request payloads sent to the completion API from raw user
//! input: the web form's two text areas, or lines typed at the terminal.

use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// Line that ends terminal input.
pub const END_MARKER: &str = "END";

/// Story id sent with terminal requests.
pub const NEW_STORY_ID: &str = "US-NEW";

const AC_PREFIX: &str = "ac:";

/// Split an acceptance criteria text area into one criterion per
/// non-blank line.
pub fn criteria_lines(blob: &str) -> Vec<String> {
    blob.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Payload for the web form flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub story: String,
    pub acceptance_criteria: Vec<String>,
}

impl StoryRequest {
    pub fn from_form(story: &str, criteria: &str) -> Self {
        Self {
            story: story.trim().to_string(),
            acceptance_criteria: criteria_lines(criteria),
        }
    }
}

/// Payload for the terminal flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPayload {
    pub user_story: String,
    pub acceptance_criteria: Vec<String>,
    pub id: String,
}

/// Read a user story from terminal input.
///
/// Lines are read until one that is exactly `END` (ignoring surrounding
/// whitespace) or end of input. The first non-blank line is the story;
/// later lines starting with `AC:` (any case) become acceptance criteria.
/// Other lines are ignored. Returns `None` when nothing was entered.
pub fn read_story<R: BufRead>(reader: R) -> std::io::Result<Option<StoryPayload>> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed == END_MARKER {
            break;
        }
        if !trimmed.is_empty() {
            rows.push(trimmed.to_string());
        }
    }

    let mut rows = rows.into_iter();
    let Some(user_story) = rows.next() else {
        return Ok(None);
    };

    let acceptance_criteria = rows
        .filter_map(|row| {
            let prefix = row.get(..AC_PREFIX.len())?;
            prefix
                .eq_ignore_ascii_case(AC_PREFIX)
                .then(|| row[AC_PREFIX.len()..].trim().to_string())
        })
        .collect();

    Ok(Some(StoryPayload {
        user_story,
        acceptance_criteria,
        id: NEW_STORY_ID.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_story_with_criteria() {
        let input = "\n  As a user, I want to log in  \nAC: valid password works\nac:   lockout after 5 tries\nnot a criterion\nEND\nAC: after end\n";
        let payload = read_story(Cursor::new(input)).unwrap().unwrap();
        assert_eq!(payload.user_story, "As a user, I want to log in");
        assert_eq!(
            payload.acceptance_criteria,
            vec!["valid password works".to_string(), "lockout after 5 tries".to_string()]
        );
        assert_eq!(payload.id, "US-NEW");
    }

    #[test]
    fn test_read_story_until_eof() {
        let payload = read_story(Cursor::new("Story only")).unwrap().unwrap();
        assert_eq!(payload.user_story, "Story only");
        assert!(payload.acceptance_criteria.is_empty());
    }

    #[test]
    fn test_read_story_empty() {
        assert!(read_story(Cursor::new("\n   \nEND\nignored")).unwrap().is_none());
        assert!(read_story(Cursor::new("")).unwrap().is_none());
    }

    #[test]
    fn test_end_marker_must_be_whole_line() {
        let payload = read_story(Cursor::new("The END of days\nAC: x\n END \nAC: y"))
            .unwrap()
            .unwrap();
        assert_eq!(payload.user_story, "The END of days");
        assert_eq!(payload.acceptance_criteria, vec!["x".to_string()]);
    }

    #[test]
    fn test_short_and_multibyte_rows() {
        let payload = read_story(Cursor::new("Story\nA\né:x\nAC:")).unwrap().unwrap();
        assert_eq!(payload.acceptance_criteria, vec![String::new()]);
    }

    #[test]
    fn test_form_request() {
        let req = StoryRequest::from_form("  story  ", "• one\n\n  two  \n");
        assert_eq!(req.story, "story");
        assert_eq!(req.acceptance_criteria, vec!["• one".to_string(), "two".to_string()]);
    }
}
