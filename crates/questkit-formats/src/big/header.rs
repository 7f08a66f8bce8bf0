//! On-disk header and table rows of a BIG archive
//!
//! All integers are little-endian `u32`. The rows here mirror the file
//! layout one-to-one; the higher level [`Archive`](super::Archive),
//! [`Bank`](super::Bank) and [`Entry`](super::Entry) types are built from
//! them by the [`ArchiveReader`](super::ArchiveReader).

use binrw::{BinRead, BinResult};

/// Four-character archive magic
pub const BIG_MAGIC: [u8; 4] = *b"BIGB";

/// Alternate archive magic: a single marker byte followed by three zero bytes
pub const BIG_MAGIC_SHORT: [u8; 4] = [b'B', 0, 0, 0];

/// Size of one skipped type-table record in an entry table
pub const TYPE_RECORD_SIZE: u64 = 8;

/// Check a magic token against both accepted spellings
pub fn is_valid_magic(magic: &[u8; 4]) -> bool {
    *magic == BIG_MAGIC || *magic == BIG_MAGIC_SHORT
}

/// Archive header (16 bytes)
///
/// ```text
/// magic:             [u8; 4]   "BIGB" or "B\0\0\0"
/// version:           u32 LE
/// bank_table_offset: u32 LE    Absolute offset of the bank table
/// content_type:      u32 LE
/// ```
#[derive(Debug, Clone, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct ArchiveHeader {
    /// Magic token
    pub magic: [u8; 4],
    /// Format version
    pub version: u32,
    /// Absolute offset of the bank table
    pub bank_table_offset: u32,
    /// Content-type tag
    pub content_type: u32,
}

/// One row of the bank table
///
/// The name is terminated by either `0x00` or `0xFF`; the terminator is
/// consumed but not part of the name.
#[derive(Debug, Clone, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct BankRecord {
    /// Bank name
    #[br(parse_with = read_terminated_name)]
    pub name: String,
    /// Bank id
    pub id: u32,
    /// Number of entries in the bank's entry table
    pub entry_count: u32,
    /// Absolute offset of the bank's entry table
    pub entry_table_offset: u32,
    /// Declared bank length in bytes
    pub length: u32,
    /// Block size
    pub block_size: u32,
}

/// Developer source path stored with an entry (`len | bytes`)
#[derive(Debug, Clone, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct DevSource {
    /// Path length in bytes
    pub length: u32,
    /// Raw path bytes
    #[br(count = length)]
    pub path: Vec<u8>,
}

/// One row of a bank's entry table
///
/// ```text
/// magic | id | type | length | data_offset | dev_file_type
/// name_length | name[name_length]
/// dev_crc | dev_source_count | dev_source_count * DevSource
/// sub_header_length | sub_header[sub_header_length]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct EntryRecord {
    /// Entry magic marker
    pub magic: u32,
    /// Entry id
    pub id: u32,
    /// Entry type tag
    pub entry_type: u32,
    /// Payload length in bytes
    pub length: u32,
    /// Absolute payload offset in the archive
    pub data_offset: u32,
    /// Developer file type
    pub dev_file_type: u32,
    /// Length of the symbol name
    pub name_length: u32,
    /// Symbol name bytes, unterminated
    #[br(count = name_length)]
    pub name: Vec<u8>,
    /// Developer CRC
    pub dev_crc: u32,
    /// Number of developer source paths
    pub dev_source_count: u32,
    /// Developer source paths
    #[br(count = dev_source_count)]
    pub dev_sources: Vec<DevSource>,
    /// Length of the sub-header blob
    pub sub_header_length: u32,
    /// Sub-header blob
    #[br(count = sub_header_length)]
    pub sub_header: Vec<u8>,
}

impl EntryRecord {
    /// Whether the name holds bytes that do not decode as plain ASCII text
    pub fn has_name_anomaly(&self) -> bool {
        self.name.iter().any(|&b| b == 0 || !b.is_ascii())
    }
}

#[binrw::parser(reader)]
fn read_terminated_name() -> BinResult<String> {
    let mut bytes = Vec::new();
    loop {
        let byte = u8::read_le(reader)?;
        if byte == 0x00 || byte == 0xFF {
            break;
        }
        bytes.push(byte);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use binrw::io::Cursor;

    fn bank_row(name: &[u8], terminator: u8) -> Vec<u8> {
        let mut data = name.to_vec();
        data.push(terminator);
        for value in [7u32, 2, 0x40, 0x100, 0x800] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_magic_spellings() {
        assert!(is_valid_magic(b"BIGB"));
        assert!(is_valid_magic(&[b'B', 0, 0, 0]));
        assert!(!is_valid_magic(b"BIGA"));
        assert!(!is_valid_magic(&[b'B', 0, 0, 1]));
        assert!(!is_valid_magic(&[0, 0, 0, 0]));
    }

    #[test]
    fn test_header_fields() {
        let mut data = b"BIGB".to_vec();
        for value in [100u32, 0x1234, 3] {
            data.extend_from_slice(&value.to_le_bytes());
        }

        let header = ArchiveHeader::read(&mut Cursor::new(&data)).unwrap();
        assert_eq!(header.magic, BIG_MAGIC);
        assert_eq!(header.version, 100);
        assert_eq!(header.bank_table_offset, 0x1234);
        assert_eq!(header.content_type, 3);
    }

    #[test]
    fn test_bank_name_terminators() {
        for terminator in [0x00, 0xFF] {
            let data = bank_row(b"GBANK_MAIN_PC", terminator);
            let bank = BankRecord::read(&mut Cursor::new(&data)).unwrap();

            assert_eq!(bank.name, "GBANK_MAIN_PC");
            assert_eq!(bank.id, 7);
            assert_eq!(bank.entry_count, 2);
            assert_eq!(bank.entry_table_offset, 0x40);
            assert_eq!(bank.length, 0x100);
            assert_eq!(bank.block_size, 0x800);
        }
    }

    #[test]
    fn test_bank_name_without_terminator_fails() {
        let data = b"NO_END".to_vec();
        assert!(BankRecord::read(&mut Cursor::new(&data)).is_err());
    }

    #[test]
    fn test_entry_record_layout() {
        let mut data = Vec::new();
        for value in [42u32, 9, 1, 5, 0x10, 2] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(b"HERO");
        data.extend_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&6u32.to_le_bytes());
        data.extend_from_slice(b"a\\b.tx");
        data.extend_from_slice(&0u32.to_le_bytes());

        let entry = EntryRecord::read(&mut Cursor::new(&data)).unwrap();
        assert_eq!(entry.magic, 42);
        assert_eq!(entry.id, 9);
        assert_eq!(entry.entry_type, 1);
        assert_eq!(entry.length, 5);
        assert_eq!(entry.data_offset, 0x10);
        assert_eq!(entry.dev_file_type, 2);
        assert_eq!(entry.name, b"HERO");
        assert_eq!(entry.dev_crc, 0xDEAD_BEEF);
        assert_eq!(entry.dev_sources.len(), 1);
        assert_eq!(entry.dev_sources[0].path, b"a\\b.tx");
        assert!(entry.sub_header.is_empty());
        assert!(!entry.has_name_anomaly());
    }

    #[test]
    fn test_name_anomaly_detection() {
        let mut record = EntryRecord {
            magic: 42,
            id: 0,
            entry_type: 0,
            length: 0,
            data_offset: 0,
            dev_file_type: 0,
            name_length: 3,
            name: b"A\0B".to_vec(),
            dev_crc: 0,
            dev_source_count: 0,
            dev_sources: Vec::new(),
            sub_header_length: 0,
            sub_header: Vec::new(),
        };
        assert!(record.has_name_anomaly());

        record.name = vec![b'A', 0xE9];
        assert!(record.has_name_anomaly());
    }
}
