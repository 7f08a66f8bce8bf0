//! Test utilities for questkit
//!
//! Provides a byte-level BIG archive builder and sample QST texts for tests.
//! The builder writes the on-disk layout by hand so tests do not depend on
//! the code under test to produce their inputs.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Magic marker written into every fixture entry
pub const FIXTURE_ENTRY_MAGIC: u32 = 42;

/// A small quest list in the style the game ships
pub const SAMPLE_QST: &str = "\
// Quest registration
AddQuest(\"Q1_Intro\",\t\t\tTRUE);
AddQuest(\"Q2_Bandits\", FALSE);
AddQuest(\"Q3_Secret\", SOME_FLAG);
AddQuest(\"Q4_Broken\", TRUE
";

/// One entry of a fixture bank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureEntry {
    /// Symbol name bytes
    pub symbol: Vec<u8>,
    /// Entry id
    pub id: u32,
    /// Entry type tag
    pub entry_type: u32,
    /// Payload bytes
    pub data: Vec<u8>,
    /// Length written to the entry table; defaults to `data.len()`
    pub declared_length: Option<u32>,
    /// Developer source paths
    pub dev_sources: Vec<String>,
    /// Sub-header blob
    pub sub_header: Vec<u8>,
}

impl FixtureEntry {
    /// Create a fixture entry with default metadata
    pub fn new(symbol: impl AsRef<[u8]>, data: impl AsRef<[u8]>) -> Self {
        Self {
            symbol: symbol.as_ref().to_vec(),
            id: 0,
            entry_type: 0,
            data: data.as_ref().to_vec(),
            declared_length: None,
            dev_sources: Vec::new(),
            sub_header: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct FixtureBank {
    name: String,
    id: u32,
    block_size: u32,
    entries: Vec<FixtureEntry>,
}

/// Builder for BIG archive bytes
///
/// Layout: header, all payloads, one entry table per bank, then the bank
/// table at the end of the file.
#[derive(Debug, Clone)]
pub struct BigFixture {
    magic: [u8; 4],
    version: u32,
    content_type: u32,
    bank_terminator: u8,
    type_count: u32,
    banks: Vec<FixtureBank>,
}

impl Default for BigFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl BigFixture {
    /// Start an archive with the four-character magic and no banks
    pub fn new() -> Self {
        Self {
            magic: *b"BIGB",
            version: 100,
            content_type: 0,
            bank_terminator: 0x00,
            type_count: 1,
            banks: Vec::new(),
        }
    }

    /// Override the magic token
    pub fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    /// Set the format version
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Set the content-type tag
    pub fn content_type(mut self, content_type: u32) -> Self {
        self.content_type = content_type;
        self
    }

    /// Byte used to terminate bank names (0x00 or 0xFF in real archives)
    pub fn bank_terminator(mut self, terminator: u8) -> Self {
        self.bank_terminator = terminator;
        self
    }

    /// Number of 8-byte type records placed before each bank's entries
    pub fn type_count(mut self, type_count: u32) -> Self {
        self.type_count = type_count;
        self
    }

    /// Start a new bank; following entries go into it
    pub fn bank(mut self, name: &str, id: u32) -> Self {
        self.banks.push(FixtureBank {
            name: name.to_string(),
            id,
            block_size: 2048,
            entries: Vec::new(),
        });
        self
    }

    /// Add an entry to the current bank, with an id following its position
    pub fn entry(self, symbol: &str, data: &[u8]) -> Self {
        let id = self.banks.iter().map(|b| b.entries.len() as u32).sum();
        let mut entry = FixtureEntry::new(symbol, data);
        entry.id = id;
        self.entry_with(entry)
    }

    /// Add a fully specified entry to the current bank
    ///
    /// # Panics
    ///
    /// Panics if no bank has been started.
    pub fn entry_with(mut self, entry: FixtureEntry) -> Self {
        self.banks
            .last_mut()
            .expect("call bank() before adding entries")
            .entries
            .push(entry);
        self
    }

    /// Produce the archive bytes
    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![0u8; 16];

        // Payloads
        let mut offsets = Vec::new();
        for bank in &self.banks {
            let mut bank_offsets = Vec::new();
            for entry in &bank.entries {
                bank_offsets.push(out.len() as u32);
                out.extend_from_slice(&entry.data);
            }
            offsets.push(bank_offsets);
        }

        // Entry tables
        let mut table_offsets = Vec::new();
        for (bank, bank_offsets) in self.banks.iter().zip(&offsets) {
            table_offsets.push(out.len() as u32);
            push_u32(&mut out, self.type_count);
            out.extend(std::iter::repeat_n(0xEE, self.type_count as usize * 8));

            for (entry, &data_offset) in bank.entries.iter().zip(bank_offsets) {
                let length = entry
                    .declared_length
                    .unwrap_or(entry.data.len() as u32);
                for value in [
                    FIXTURE_ENTRY_MAGIC,
                    entry.id,
                    entry.entry_type,
                    length,
                    data_offset,
                    0,
                ] {
                    push_u32(&mut out, value);
                }
                push_u32(&mut out, entry.symbol.len() as u32);
                out.extend_from_slice(&entry.symbol);
                push_u32(&mut out, 0x1234_5678);
                push_u32(&mut out, entry.dev_sources.len() as u32);
                for source in &entry.dev_sources {
                    push_u32(&mut out, source.len() as u32);
                    out.extend_from_slice(source.as_bytes());
                }
                push_u32(&mut out, entry.sub_header.len() as u32);
                out.extend_from_slice(&entry.sub_header);
            }
        }

        // Bank table
        let bank_table_offset = out.len() as u32;
        push_u32(&mut out, self.banks.len() as u32);
        for (bank, &table_offset) in self.banks.iter().zip(&table_offsets) {
            out.extend_from_slice(bank.name.as_bytes());
            out.push(self.bank_terminator);
            let bank_length: u32 = bank.entries.iter().map(|e| e.data.len() as u32).sum();
            for value in [
                bank.id,
                bank.entries.len() as u32,
                table_offset,
                bank_length,
                bank.block_size,
            ] {
                push_u32(&mut out, value);
            }
        }

        // Header
        out[0..4].copy_from_slice(&self.magic);
        out[4..8].copy_from_slice(&self.version.to_le_bytes());
        out[8..12].copy_from_slice(&bank_table_offset.to_le_bytes());
        out[12..16].copy_from_slice(&self.content_type.to_le_bytes());

        out
    }

    /// Write the archive into `dir` under `file_name`
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_to(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, self.build()).expect("failed to write fixture archive");
        path
    }

    /// Write the archive into a fresh temporary directory
    ///
    /// Keep the returned directory alive for as long as the file is needed.
    ///
    /// # Panics
    ///
    /// Panics if the directory or file cannot be created.
    pub fn write_temp(&self) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = self.write_to(dir.path(), "fixture.big");
        (dir, path)
    }
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Write `text` to `file_name` inside a fresh temporary directory
///
/// # Panics
///
/// Panics if the directory or file cannot be created.
pub fn write_temp_text(file_name: &str, text: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(file_name);
    std::fs::write(&path, text).expect("failed to write temp file");
    (dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_points_at_bank_table() {
        let data = BigFixture::new().bank("B", 1).entry("E", b"xyz").build();

        assert_eq!(&data[0..4], b"BIGB");
        let table = u32::from_le_bytes([data[8], data[9], data[10], data[11]]) as usize;
        assert_eq!(
            u32::from_le_bytes([data[table], data[table + 1], data[table + 2], data[table + 3]]),
            1
        );
        assert_eq!(&data[table + 4..table + 6], b"B\0");
    }

    #[test]
    fn test_payloads_follow_header() {
        let data = BigFixture::new().bank("B", 1).entry("E", b"xyz").build();
        assert_eq!(&data[16..19], b"xyz");
    }
}
