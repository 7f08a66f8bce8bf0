//! Prebuilt symbol index over an archive

use crate::big::archive::Archive;
use crate::big::entry::Entry;
use std::collections::HashMap;

/// Case-folded symbol name → `(bank index, entry index)`
///
/// Gives the same answer as [`Archive::find_entry`] (first occurrence in
/// bank order wins) without scanning. The index is a snapshot; entries
/// appended after it was built are not in it.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    positions: HashMap<String, (usize, usize)>,
}

impl SymbolIndex {
    /// Index every entry of `archive`
    pub fn build(archive: &Archive) -> Self {
        let mut positions = HashMap::with_capacity(archive.entry_count());

        for (bank_index, bank) in archive.banks().iter().enumerate() {
            for (entry_index, entry) in bank.entries().iter().enumerate() {
                positions
                    .entry(entry.symbol_name().to_ascii_lowercase())
                    .or_insert((bank_index, entry_index));
            }
        }

        Self { positions }
    }

    /// Position of the entry named `symbol`
    pub fn get(&self, symbol: &str) -> Option<(usize, usize)> {
        self.positions.get(&symbol.to_ascii_lowercase()).copied()
    }

    /// Look `symbol` up in `archive`, which must be the archive this index was built from
    pub fn resolve<'a>(&self, archive: &'a Archive, symbol: &str) -> Option<&'a Entry> {
        let (bank_index, entry_index) = self.get(symbol)?;
        archive.banks().get(bank_index)?.entries().get(entry_index)
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::big::Bank;
    use proptest::prelude::*;

    fn archive_from(banks: &[Vec<String>]) -> Archive {
        let mut archive = Archive::new(1, 0);
        for (b, names) in banks.iter().enumerate() {
            let mut bank = Bank::new(format!("BANK_{b}"), b as u32, 2048).unwrap();
            for (e, name) in names.iter().enumerate() {
                let entry = Entry::new(name.clone(), e as u32, b as u32, Vec::<u8>::new()).unwrap();
                bank.add_entry(entry);
            }
            archive.add_bank(bank);
        }
        archive
    }

    #[test]
    fn test_index_first_occurrence_wins() {
        let archive = archive_from(&[
            vec!["A".into(), "B".into()],
            vec!["b".into(), "C".into()],
        ]);
        let index = archive.symbol_index();

        assert_eq!(index.len(), 3);
        assert_eq!(index.get("B"), Some((0, 1)));
        assert_eq!(index.get("c"), Some((1, 1)));
        assert_eq!(index.get("D"), None);
        assert_eq!(index.resolve(&archive, "a").unwrap().symbol_name(), "A");
    }

    proptest! {
        /// The index always agrees with the linear lookup
        #[test]
        fn index_matches_linear_lookup(
            banks in prop::collection::vec(
                prop::collection::vec("[A-Za-z_]{1,4}", 0..8),
                0..4
            ),
            probe in "[A-Za-z_]{1,4}"
        ) {
            let archive = archive_from(&banks);
            let index = archive.symbol_index();

            let linear = archive.find_entry(&probe).map(|e| (e.entry_type, e.id));
            let indexed = index.resolve(&archive, &probe).map(|e| (e.entry_type, e.id));
            prop_assert_eq!(linear, indexed);
        }
    }
}
