//! Character scanner that pulls `AddQuest(...)` calls out of raw text
//!
//! The scanner has two states, outside and inside a string literal. Inside
//! a string, a backslash escapes the next character, so `\"` neither ends
//! the string nor acts as a delimiter.

use tracing::debug;

const KEYWORD: &[u8] = b"AddQuest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Default,
    InString { escaped: bool },
}

impl ScanState {
    /// Next state after consuming `byte`
    fn step(self, byte: u8) -> Self {
        match self {
            Self::Default if byte == b'"' => Self::InString { escaped: false },
            Self::Default => Self::Default,
            Self::InString { escaped: true } => Self::InString { escaped: false },
            Self::InString { escaped: false } => match byte {
                b'\\' => Self::InString { escaped: true },
                b'"' => Self::Default,
                _ => self,
            },
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether the keyword starts at `pos` as a whole word
///
/// Neighbours are compared as chars, so a keyword glued to a non-ASCII
/// letter is part of a longer identifier.
fn keyword_at(text: &str, pos: usize) -> bool {
    // An ASCII match also puts `pos` and the keyword end on char boundaries
    if !text.as_bytes()[pos..].starts_with(KEYWORD) {
        return false;
    }
    let end = pos + KEYWORD.len();
    let before_ok = text[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !is_identifier_char(c));
    let after_ok = text[end..]
        .chars()
        .next()
        .is_none_or(|c| !is_identifier_char(c));
    before_ok && after_ok
}

/// Split the parenthesised argument list that follows the keyword
///
/// Returns the trimmed arguments and the position just past the closing
/// parenthesis, or `None` if there is no `(` or it is never closed.
fn parse_arguments(text: &str, start: usize) -> Option<(Vec<&str>, usize)> {
    let bytes = text.as_bytes();
    let mut pos = start;
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    if bytes.get(pos) != Some(&b'(') {
        return None;
    }
    pos += 1;

    let mut depth = 1usize;
    let mut state = ScanState::Default;
    let mut arg_start = pos;
    let mut args = Vec::new();

    while pos < bytes.len() {
        let byte = bytes[pos];
        if state == ScanState::Default {
            match byte {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        args.push(text[arg_start..pos].trim());
                        return Some((args, pos + 1));
                    }
                }
                b',' if depth == 1 => {
                    args.push(text[arg_start..pos].trim());
                    arg_start = pos + 1;
                }
                _ => {}
            }
        }
        state = state.step(byte);
        pos += 1;
    }

    None
}

/// Collect the argument lists of every well-formed `AddQuest` call in `text`
pub(crate) fn scan_quest_calls(text: &str) -> Vec<Vec<&str>> {
    let bytes = text.as_bytes();
    let mut calls = Vec::new();
    let mut state = ScanState::Default;
    let mut pos = 0;

    while pos < bytes.len() {
        if state == ScanState::Default && keyword_at(text, pos) {
            let after_keyword = pos + KEYWORD.len();
            if let Some((args, end)) = parse_arguments(text, after_keyword) {
                calls.push(args);
                pos = end;
            } else {
                debug!("Skipping malformed AddQuest call at byte {}", pos);
                pos = after_keyword;
            }
            continue;
        }

        state = state.step(bytes[pos]);
        pos += 1;
    }

    calls
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_calls() {
        let calls = scan_quest_calls("AddQuest(\"Q1\", TRUE);\nAddQuest(\"Q2\", FALSE);");
        assert_eq!(calls, vec![vec!["\"Q1\"", "TRUE"], vec!["\"Q2\"", "FALSE"]]);
    }

    #[test]
    fn test_whitespace_and_extra_arguments() {
        let calls = scan_quest_calls("  AddQuest ( \"Q1\" ,\t1 , 7 ) ;");
        assert_eq!(calls, vec![vec!["\"Q1\"", "1", "7"]]);
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert!(scan_quest_calls("MyAddQuest(\"A\", TRUE);").is_empty());
        assert!(scan_quest_calls("AddQuests(\"A\", TRUE);").is_empty());
        assert!(scan_quest_calls("AddQuest_2(\"A\", TRUE);").is_empty());
        assert_eq!(scan_quest_calls(";AddQuest(\"A\", TRUE);").len(), 1);
    }

    #[test]
    fn test_keyword_next_to_non_ascii_letters() {
        assert!(scan_quest_calls("éAddQuest(\"A\", TRUE);").is_empty());
        assert!(scan_quest_calls("AddQuestä(\"A\", TRUE);").is_empty());
        assert!(scan_quest_calls("ДAddQuest(\"A\", TRUE);").is_empty());
        assert_eq!(
            scan_quest_calls("é AddQuest(\"A\", TRUE); § AddQuest(\"B\", 0);"),
            vec![vec!["\"A\"", "TRUE"], vec!["\"B\"", "0"]]
        );
    }

    #[test]
    fn test_keyword_inside_string_ignored() {
        let calls = scan_quest_calls("Log(\"AddQuest(\\\"X\\\", TRUE)\"); AddQuest(\"Y\", 0);");
        assert_eq!(calls, vec![vec!["\"Y\"", "0"]]);
    }

    #[test]
    fn test_delimiters_inside_strings_are_literal() {
        let calls = scan_quest_calls(r#"AddQuest("a, b) \" c", TRUE);"#);
        assert_eq!(calls, vec![vec![r#""a, b) \" c""#, "TRUE"]]);
    }

    #[test]
    fn test_nested_parentheses() {
        let calls = scan_quest_calls("AddQuest(\"Q\", IsSet(FLAG_A, FLAG_B));");
        assert_eq!(calls, vec![vec!["\"Q\"", "IsSet(FLAG_A, FLAG_B)"]]);
    }

    #[test]
    fn test_unterminated_call_skipped() {
        let calls = scan_quest_calls("AddQuest(\"Broken\", TRUE\n");
        assert!(calls.is_empty());
    }

    #[test]
    fn test_keyword_without_parenthesis_skipped() {
        let calls = scan_quest_calls("AddQuest;\nAddQuest(\"Ok\", TRUE);");
        assert_eq!(calls, vec![vec!["\"Ok\"", "TRUE"]]);
    }

    #[test]
    fn test_malformed_call_does_not_hide_later_calls() {
        let calls = scan_quest_calls("AddQuest(\"Bad\", TRUE;\nAddQuest(\"Good\", TRUE);");
        assert_eq!(calls, vec![vec!["\"Good\"", "TRUE"]]);
    }

    proptest! {
        /// Scanning arbitrary text never panics
        #[test]
        fn scan_never_panics(text in ".{0,200}") {
            let _ = scan_quest_calls(&text);
        }

        /// Well-formed calls are always found in order
        #[test]
        fn well_formed_calls_found(
            names in prop::collection::vec("[A-Za-z0-9_ ]{1,12}", 0..10),
            padding in "[ \t\r\n;]{0,4}"
        ) {
            let text: String = names
                .iter()
                .map(|n| format!("AddQuest(\"{n}\", TRUE);{padding}\n"))
                .collect();
            let calls = scan_quest_calls(&text);

            prop_assert_eq!(calls.len(), names.len());
            for (args, name) in calls.iter().zip(&names) {
                prop_assert_eq!(args[0].to_string(), format!("\"{name}\""));
            }
        }
    }
}
