//! BIG archive container format
//!
//! A BIG archive is a bank/entry indexed blob container. The file starts with
//! a small header pointing at a bank table; each bank row points at that
//! bank's entry table elsewhere in the file; each entry row points at the
//! entry's payload.
//!
//! # Architecture
//!
//! ```text
//! Header → Bank table → Entry table (per bank) → Payload (per entry, lazy)
//! ```
//!
//! [`ArchiveReader`] walks the tables once and produces an [`Archive`] that
//! owns its [`Bank`]s, which own their [`Entry`]s. Payloads are not read
//! during parsing; each entry keeps a [`SourceLocation`] and reads its bytes
//! on the first call to [`Entry::data`].
//!
//! # Binary Layout
//!
//! All integers are little-endian `u32`:
//!
//! ```text
//! Header:      magic[4] | version | bank_table_offset | content_type
//! Bank table:  bank_count
//!   per bank:  name (0x00/0xFF-terminated) | id | entry_count
//!              | entry_table_offset | length | block_size
//! Entry table: type_count | type_count * 8 bytes (skipped)
//!   per entry: magic | id | type | length | data_offset | dev_file_type
//!              | name_length | name[name_length]
//!              | dev_crc | dev_source_count | dev_source_count * (len | bytes)
//!              | sub_header_length | sub_header[sub_header_length]
//! ```
//!
//! # Usage Examples
//!
//! ## Find and extract an entry
//!
//! ```rust,no_run
//! use questkit_formats::big::Archive;
//!
//! let mut archive = Archive::open("graphics.big")?;
//! if let Some(entry) = archive.find_entry_mut("MESH_HERO") {
//!     let bytes = entry.data()?;
//!     println!("{} bytes", bytes.len());
//!     entry.extract_to("out/MESH_HERO.bin")?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Read from an in-memory stream
//!
//! ```rust
//! use questkit_formats::big::{ArchiveReader, BigError};
//! use std::io::Cursor;
//!
//! let result = ArchiveReader::new(Cursor::new(b"NOPE".to_vec())).read_archive();
//! assert!(matches!(result, Err(BigError::InvalidMagic(_))));
//! ```

mod archive;
mod bank;
mod entry;
mod error;
mod header;
mod index;
mod reader;

pub use archive::Archive;
pub use bank::Bank;
pub use entry::{COPY_CHUNK_SIZE, DEFAULT_ENTRY_MAGIC, Entry, SourceLocation};
pub use error::{BigError, BigResult};
pub use header::{
    ArchiveHeader, BIG_MAGIC, BIG_MAGIC_SHORT, BankRecord, DevSource, EntryRecord,
    TYPE_RECORD_SIZE, is_valid_magic,
};
pub use index::SymbolIndex;
pub use reader::ArchiveReader;
