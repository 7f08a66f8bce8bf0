//! Archive entries and lazy payload access
//!
//! An entry read from an archive does not carry its payload. It remembers
//! where the bytes live ([`SourceLocation`]) and reads them the first time
//! [`Entry::data`] is called. Replacing the payload switches the entry to
//! an inline buffer for good.

use crate::big::error::{BigError, BigResult};
use crate::big::header::EntryRecord;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Magic marker given to newly authored entries
pub const DEFAULT_ENTRY_MAGIC: u32 = 42;

/// Chunk size used when streaming a payload straight from its source
pub const COPY_CHUNK_SIZE: usize = 64 * 1024;

/// Where an entry's payload lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Backing file; `None` when the archive was not read from a file
    pub path: Option<PathBuf>,
    /// Absolute offset of the payload
    pub offset: u64,
    /// Payload length in bytes
    pub length: u64,
}

impl SourceLocation {
    /// Create new source location
    pub fn new(path: Option<PathBuf>, offset: u64, length: u64) -> Self {
        Self {
            path,
            offset,
            length,
        }
    }

    fn open(path: &Path, offset: u64) -> io::Result<File> {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(offset))?;
        Ok(file)
    }

    /// Read up to `length` bytes; a short file yields a shorter buffer
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        let file = Self::open(path, self.offset)?;
        let mut buffer = Vec::new();
        file.take(self.length).read_to_end(&mut buffer)?;

        if (buffer.len() as u64) < self.length {
            debug!(
                "Short read from {}: expected {} bytes at offset {}, got {}",
                path.display(),
                self.length,
                self.offset,
                buffer.len()
            );
        }

        Ok(buffer)
    }

    /// Stream up to `length` bytes into `writer` without buffering the whole payload
    fn copy_to<W: Write>(&self, writer: &mut W) -> io::Result<u64> {
        let Some(path) = self.path.as_deref() else {
            return Ok(0);
        };

        copy_window(Self::open(path, self.offset)?, self.length, writer)
    }
}

/// Copy at most `length` bytes from `source`; interrupted reads are retried
fn copy_window<R: Read, W: Write>(source: R, length: u64, writer: &mut W) -> io::Result<u64> {
    let mut source = BufReader::with_capacity(COPY_CHUNK_SIZE, source.take(length));
    io::copy(&mut source, writer)
}

/// Entry payload state
#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
    /// Bytes owned by the entry, set at creation or by a replace
    Inline(Vec<u8>),
    /// Bytes still in the archive; `cached` fills on first read
    Source {
        location: SourceLocation,
        cached: Option<Vec<u8>>,
    },
}

/// A single named record inside a bank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry magic marker
    pub magic: u32,
    symbol_name: String,
    /// Entry id
    pub id: u32,
    /// Entry type tag
    pub entry_type: u32,
    /// Payload offset recorded in the archive
    pub data_offset: u32,
    /// Developer file type (provenance only)
    pub dev_file_type: u32,
    /// Developer CRC (provenance only)
    pub dev_crc: u32,
    /// Developer source paths (provenance only)
    pub dev_sources: Vec<String>,
    /// Sub-header blob; empty when the archive stores none
    pub sub_header: Vec<u8>,
    modified: bool,
    payload: Payload,
}

impl Entry {
    /// Create an entry that owns its payload
    ///
    /// New entries are marked modified from the start.
    pub fn new(
        symbol_name: impl Into<String>,
        id: u32,
        entry_type: u32,
        data: impl Into<Vec<u8>>,
    ) -> BigResult<Self> {
        let symbol_name = symbol_name.into();
        if symbol_name.is_empty() {
            return Err(BigError::EmptyName { kind: "entry" });
        }

        Ok(Self {
            magic: DEFAULT_ENTRY_MAGIC,
            symbol_name,
            id,
            entry_type,
            data_offset: 0,
            dev_file_type: 0,
            dev_crc: 0,
            dev_sources: Vec::new(),
            sub_header: Vec::new(),
            modified: true,
            payload: Payload::Inline(data.into()),
        })
    }

    /// Build an entry from its table row, pointing its payload at `source_path`
    pub(crate) fn from_record(record: EntryRecord, source_path: Option<&Path>) -> BigResult<Self> {
        if record.name.is_empty() {
            return Err(BigError::EmptyName { kind: "entry" });
        }

        let location = SourceLocation::new(
            source_path.map(Path::to_path_buf),
            u64::from(record.data_offset),
            u64::from(record.length),
        );

        Ok(Self {
            magic: record.magic,
            symbol_name: String::from_utf8_lossy(&record.name).into_owned(),
            id: record.id,
            entry_type: record.entry_type,
            data_offset: record.data_offset,
            dev_file_type: record.dev_file_type,
            dev_crc: record.dev_crc,
            dev_sources: record
                .dev_sources
                .iter()
                .map(|source| String::from_utf8_lossy(&source.path).into_owned())
                .collect(),
            sub_header: record.sub_header,
            modified: false,
            payload: Payload::Source {
                location,
                cached: None,
            },
        })
    }

    /// Symbol name used for lookup
    pub fn symbol_name(&self) -> &str {
        &self.symbol_name
    }

    /// Whether `symbol` names this entry (ASCII case-insensitive)
    pub fn matches(&self, symbol: &str) -> bool {
        self.symbol_name.eq_ignore_ascii_case(symbol)
    }

    /// Authoritative payload length
    ///
    /// This is the recorded source length until the payload is replaced,
    /// and the in-memory buffer length afterwards.
    pub fn length(&self) -> u64 {
        match &self.payload {
            Payload::Inline(bytes) => bytes.len() as u64,
            Payload::Source { location, .. } => location.length,
        }
    }

    /// Whether the payload was replaced or authored in memory
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Whether the payload bytes are held in memory
    pub fn is_loaded(&self) -> bool {
        match &self.payload {
            Payload::Inline(_) => true,
            Payload::Source { cached, .. } => cached.is_some(),
        }
    }

    /// Backing location, if the payload has not been replaced
    pub fn source(&self) -> Option<&SourceLocation> {
        match &self.payload {
            Payload::Inline(_) => None,
            Payload::Source { location, .. } => Some(location),
        }
    }

    /// Get the payload bytes, reading them from the source on first access
    ///
    /// The result is cached, so later calls return the same bytes even if
    /// the backing file is gone. An entry with no backing path yields an
    /// empty slice.
    pub fn data(&mut self) -> BigResult<&[u8]> {
        match &mut self.payload {
            Payload::Inline(bytes) => Ok(bytes.as_slice()),
            Payload::Source { location, cached } => {
                if cached.is_none() {
                    let Some(path) = location.path.as_deref() else {
                        return Ok(&[]);
                    };
                    trace!("Faulting in {} from {}", self.symbol_name, path.display());
                    *cached = Some(location.read_all(path)?);
                }
                Ok(cached.as_deref().unwrap_or_default())
            }
        }
    }

    /// Replace the payload with an in-memory buffer
    ///
    /// The entry stays modified from here on and its source is no longer read.
    pub fn replace_data(&mut self, data: impl Into<Vec<u8>>) {
        self.payload = Payload::Inline(data.into());
        self.modified = true;
    }

    /// Write the payload to `writer`, returning the number of bytes written
    ///
    /// In-memory bytes are written in one call. Otherwise the payload is
    /// streamed from its source in [`COPY_CHUNK_SIZE`] chunks without being
    /// loaded whole. An entry with neither writes nothing.
    pub fn write_data_to<W: Write>(&self, writer: &mut W) -> BigResult<u64> {
        match &self.payload {
            Payload::Inline(bytes)
            | Payload::Source {
                cached: Some(bytes),
                ..
            } => {
                writer.write_all(bytes)?;
                Ok(bytes.len() as u64)
            }
            Payload::Source {
                location,
                cached: None,
            } => Ok(location.copy_to(writer)?),
        }
    }

    /// Write the payload to a file, creating parent directories as needed
    pub fn extract_to<P: AsRef<Path>>(&self, path: P) -> BigResult<u64> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        let written = self.write_data_to(&mut writer)?;
        writer.flush()?;

        debug!(
            "Extracted {} ({} bytes) to {}",
            self.symbol_name,
            written,
            path.display()
        );
        Ok(written)
    }
}
