//! QST file model, loading and saving

use crate::qst::error::{QstError, QstResult};
use crate::qst::scanner::scan_quest_calls;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canonical spelling written for an enabled quest
const TRUE_LITERAL: &str = "TRUE";
/// Canonical spelling written for a disabled quest
const FALSE_LITERAL: &str = "FALSE";
/// Line terminator used when saving
const LINE_ENDING: &str = "\r\n";

/// One registered quest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QstQuestEntry {
    name: String,
    raw_name: String,
    enabled: Option<bool>,
    raw_enabled: String,
}

impl QstQuestEntry {
    /// Create an entry with a literal enabled value
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        let name = name.into();
        let raw = if enabled { TRUE_LITERAL } else { FALSE_LITERAL };
        Self {
            raw_name: escape(&name),
            name,
            enabled: Some(enabled),
            raw_enabled: raw.to_string(),
        }
    }

    /// Build an entry from the first two raw call arguments
    fn from_arguments(name: &str, enabled: &str) -> Self {
        let raw_name = quoted_inner(name).map_or_else(|| escape(name), str::to_string);
        Self {
            name: unquote(name),
            raw_name,
            enabled: parse_enabled(enabled),
            raw_enabled: enabled.to_string(),
        }
    }

    /// Quest name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name text written between the quotes on save
    ///
    /// Parsed entries keep the text exactly as it appeared in the file, so
    /// escapes the parser does not decode are written back untouched.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Parsed enabled value; `None` when the file uses something other than a literal
    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    /// Enabled expression exactly as read
    pub fn raw_enabled(&self) -> &str {
        &self.raw_enabled
    }

    /// Value text written on save
    pub fn value_text(&self) -> &str {
        match self.enabled {
            Some(true) => TRUE_LITERAL,
            Some(false) => FALSE_LITERAL,
            None => &self.raw_enabled,
        }
    }
}

/// Recognise `true`/`1` and `false`/`0`, ignoring ASCII case
fn parse_enabled(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

/// Text between one pair of surrounding quotes
fn quoted_inner(arg: &str) -> Option<&str> {
    arg.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
}

/// Strip one pair of surrounding quotes and decode `\"` and `\\`
fn unquote(arg: &str) -> String {
    let Some(inner) = quoted_inner(arg) else {
        return arg.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Inverse of [`unquote`] for the text between the quotes
fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

/// A quest registration list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QstFile {
    entries: Vec<QstQuestEntry>,
    source_path: Option<PathBuf>,
}

impl QstFile {
    /// Create an empty list with no backing file
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse QST text; never fails, unrecognised content is skipped
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for args in scan_quest_calls(text) {
            if let [name, enabled, ..] = args.as_slice() {
                entries.push(QstQuestEntry::from_arguments(name, enabled));
            } else {
                debug!("Ignoring AddQuest call with {} argument(s)", args.len());
            }
        }

        Self {
            entries,
            source_path: None,
        }
    }

    /// Load and parse a file, remembering its path for [`QstFile::save`]
    ///
    /// Only I/O problems are errors. Bytes that are not valid UTF-8 are
    /// replaced rather than rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> QstResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let mut file = Self::parse(&String::from_utf8_lossy(&bytes));
        file.source_path = Some(path.to_path_buf());

        debug!("Loaded {} quests from {}", file.len(), path.display());
        Ok(file)
    }

    /// Quests in file order
    pub fn entries(&self) -> &[QstQuestEntry] {
        &self.entries
    }

    /// Number of quests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path the file was loaded from or last saved to
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// First quest with the given name, ignoring ASCII case
    pub fn find_quest(&self, name: &str) -> Option<&QstQuestEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Whether a quest with the given name is registered, ignoring ASCII case
    pub fn has_quest(&self, name: &str) -> bool {
        self.find_quest(name).is_some()
    }

    /// Append a quest unless one with the same name exists
    ///
    /// Returns `true` if the quest was added.
    pub fn add_quest_if_missing(&mut self, name: &str, enabled: bool) -> bool {
        if self.has_quest(name) {
            return false;
        }
        self.entries.push(QstQuestEntry::new(name, enabled));
        true
    }

    /// Text that [`QstFile::save`] writes
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = write!(
                out,
                "AddQuest(\"{}\", \t\t\t{});{}",
                entry.raw_name,
                entry.value_text(),
                LINE_ENDING
            );
        }
        out
    }

    /// Rewrite the whole file from the in-memory list
    ///
    /// Writes to `path` if given, else to the remembered source path. Text
    /// outside recognised calls in the original file is not preserved.
    pub fn save(&mut self, path: Option<&Path>) -> QstResult<()> {
        let target = path
            .map(Path::to_path_buf)
            .or_else(|| self.source_path.clone())
            .ok_or(QstError::NoOutputPath)?;

        fs::write(&target, self.render())?;
        debug!("Saved {} quests to {}", self.len(), target.display());

        self.source_path = Some(target);
        Ok(())
    }
}
