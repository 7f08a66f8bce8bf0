//! File format readers for a game modding toolchain
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::doc_markdown)] // Format terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
//! This crate provides the systems layer behind the quest and behavior
//! editor: a reader for the game's BIG asset container and a tolerant
//! parser/writer for the QST quest registration list.
//!
//! # Supported Formats
//!
//! - **BIG**: Bank/entry indexed blob archive with lazily loaded entry payloads
//! - **QST**: Quest registration text made of `AddQuest(...)` statements
//!
//! # Design Principles
//!
//! - **Read-Oriented**: Archives are parsed once into an immutable-by-convention
//!   graph; entry payloads are faulted in from disk only when asked for
//! - **No Partial Results**: A malformed archive is an error, never a truncated archive
//! - **Lossless Round-Trip**: QST values the parser does not understand are
//!   written back verbatim

#![warn(missing_docs)]

/// BIG archive container format
///
/// An archive holds an ordered list of named banks, each holding an ordered
/// list of entries. Entry payloads stay on disk until first accessed.
///
/// Key features:
/// - **Two-Pass Table Reading**: Bank headers and entry tables live in
///   different parts of the file
/// - **Lazy Payloads**: Entries remember where their bytes live and read them on demand
/// - **Replace-On-Write**: Entry payloads can be replaced in memory
/// - **Case-Insensitive Lookup**: Entries are found by symbol name across all banks
///
/// See the [`big`] module for usage examples.
pub mod big;
/// QST quest registration list
pub mod qst;
