//! Top-level BIG archive container

use crate::big::bank::Bank;
use crate::big::entry::Entry;
use crate::big::error::BigResult;
use crate::big::index::SymbolIndex;
use crate::big::reader::ArchiveReader;
use std::path::Path;

/// A BIG archive: format metadata plus banks in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    /// Format version
    pub version: u32,
    /// Content-type tag
    pub content_type: u32,
    banks: Vec<Bank>,
}

impl Archive {
    /// Create an empty archive for authoring
    pub fn new(version: u32, content_type: u32) -> Self {
        Self {
            version,
            content_type,
            banks: Vec::new(),
        }
    }

    /// Read an archive from disk; entry payloads stay on disk until accessed
    pub fn open<P: AsRef<Path>>(path: P) -> BigResult<Self> {
        ArchiveReader::open(path)?.read_archive()
    }

    /// Banks in file order
    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    /// Mutable access to the banks; the list itself cannot shrink
    pub fn banks_mut(&mut self) -> &mut [Bank] {
        &mut self.banks
    }

    /// Append a bank
    pub fn add_bank(&mut self, bank: Bank) {
        self.banks.push(bank);
    }

    /// First bank with the given name, ignoring ASCII case
    pub fn bank(&self, name: &str) -> Option<&Bank> {
        self.banks
            .iter()
            .find(|bank| bank.name().eq_ignore_ascii_case(name))
    }

    /// Mutable variant of [`Archive::bank`]
    pub fn bank_mut(&mut self, name: &str) -> Option<&mut Bank> {
        self.banks
            .iter_mut()
            .find(|bank| bank.name().eq_ignore_ascii_case(name))
    }

    /// Find an entry by symbol name
    ///
    /// Banks are searched in order, then entries within each bank; the
    /// first case-insensitive match wins.
    pub fn find_entry(&self, symbol: &str) -> Option<&Entry> {
        self.banks.iter().find_map(|bank| bank.find_entry(symbol))
    }

    /// Mutable variant of [`Archive::find_entry`]
    pub fn find_entry_mut(&mut self, symbol: &str) -> Option<&mut Entry> {
        self.banks
            .iter_mut()
            .find_map(|bank| bank.find_entry_mut(symbol))
    }

    /// Every entry of every bank, in nested order
    ///
    /// Builds a new vector on each call.
    pub fn all_entries(&self) -> Vec<&Entry> {
        self.banks.iter().flat_map(Bank::entries).collect()
    }

    /// Total number of entries across all banks
    pub fn entry_count(&self) -> usize {
        self.banks.iter().map(Bank::len).sum()
    }

    /// Build a symbol index for repeated lookups
    pub fn symbol_index(&self) -> SymbolIndex {
        SymbolIndex::build(self)
    }
}
