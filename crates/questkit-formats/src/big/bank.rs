//! Banks: named, ordered groups of entries

use crate::big::entry::Entry;
use crate::big::error::{BigError, BigResult};
use crate::big::header::BankRecord;

/// A named collection of entries with its own layout metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    name: String,
    /// Bank id
    pub id: u32,
    /// Block size
    pub block_size: u32,
    /// Offset of the bank's entry table in the archive
    pub entry_table_offset: u32,
    /// Declared bank length in bytes
    pub length: u32,
    entries: Vec<Entry>,
}

impl Bank {
    /// Create an empty bank for authoring
    pub fn new(name: impl Into<String>, id: u32, block_size: u32) -> BigResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(BigError::EmptyName { kind: "bank" });
        }

        Ok(Self {
            name,
            id,
            block_size,
            entry_table_offset: 0,
            length: 0,
            entries: Vec::new(),
        })
    }

    /// Create an empty bank from its bank-table row
    pub(crate) fn from_record(record: &BankRecord) -> BigResult<Self> {
        let mut bank = Self::new(record.name.clone(), record.id, record.block_size)?;
        bank.entry_table_offset = record.entry_table_offset;
        bank.length = record.length;
        Ok(bank)
    }

    /// Bank name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in file order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Mutable access to the entries; the list itself cannot shrink
    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    /// Append an entry
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bank has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry in this bank whose symbol matches, ignoring ASCII case
    pub fn find_entry(&self, symbol: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.matches(symbol))
    }

    /// Mutable variant of [`Bank::find_entry`]
    pub fn find_entry_mut(&mut self, symbol: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.matches(symbol))
    }
}
