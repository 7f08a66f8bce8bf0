//! QST quest registration list
//!
//! A QST file is free-form text holding calls of the shape
//! `AddQuest("<name>", <enabled>);`. The parser pulls out every such call it
//! can recognise and ignores everything else, including malformed calls.
//!
//! Saving rewrites the whole file from the parsed list: one line per quest,
//! with enabled values the parser did not understand written back exactly
//! as they were read.
//!
//! # Usage Examples
//!
//! ```rust
//! use questkit_formats::qst::QstFile;
//!
//! let mut qst = QstFile::parse("AddQuest(\"Q1\", TRUE);\nAddQuest(\"Q3\", SOME_FLAG);");
//! assert!(qst.has_quest("q1"));
//! assert_eq!(qst.entries()[1].enabled(), None);
//!
//! assert!(qst.add_quest_if_missing("Q4", false));
//! assert!(qst.render().contains("AddQuest(\"Q3\", \t\t\tSOME_FLAG);"));
//! ```

mod error;
mod file;
mod scanner;

pub use error::{QstError, QstResult};
pub use file::{QstFile, QstQuestEntry};
