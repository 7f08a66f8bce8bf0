//! One-shot BIG archive parser
//!
//! Reading happens in two passes over a seekable stream. The bank table is
//! scanned sequentially; for each bank row the reader jumps to that bank's
//! entry table, reads it, and returns to the bank table before the next row.

use crate::big::archive::Archive;
use crate::big::bank::Bank;
use crate::big::entry::Entry;
use crate::big::error::{BigError, BigResult};
use crate::big::header::{
    ArchiveHeader, BankRecord, EntryRecord, TYPE_RECORD_SIZE, is_valid_magic,
};
use binrw::BinRead;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Reads a complete [`Archive`] from a stream
pub struct ArchiveReader<R: Read + Seek> {
    reader: R,
    source_path: Option<PathBuf>,
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Create a reader over a stream with no backing file
    ///
    /// Entries read this way have no source path, so their payloads read
    /// back as empty.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            source_path: None,
        }
    }

    /// Create a reader over a stream backed by the file at `path`
    pub fn with_source_path(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            source_path: Some(path.into()),
        }
    }

    /// Parse the whole archive
    ///
    /// Fails without returning anything partial if the stream cannot seek,
    /// the magic is wrong, or any table is truncated.
    pub fn read_archive(mut self) -> BigResult<Archive> {
        let start = self.reader.stream_position().map_err(|e| {
            BigError::UnsupportedInput(format!("BIG archives need a seekable stream: {e}"))
        })?;

        let mut magic = [0u8; 4];
        self.reader.read_exact(&mut magic)?;
        if !is_valid_magic(&magic) {
            return Err(BigError::InvalidMagic(magic));
        }
        self.reader.seek(SeekFrom::Start(start))?;

        let header = ArchiveHeader::read(&mut self.reader)?;
        debug!(
            "BIG header: version={}, bank_table_offset={:#x}, content_type={}",
            header.version, header.bank_table_offset, header.content_type
        );

        self.reader
            .seek(SeekFrom::Start(u64::from(header.bank_table_offset)))?;
        let bank_count = u32::read_le(&mut self.reader)?;

        let mut archive = Archive::new(header.version, header.content_type);
        for _ in 0..bank_count {
            let record = BankRecord::read(&mut self.reader)?;
            let resume = self.reader.stream_position()?;

            let bank = self.read_bank(&record)?;
            archive.add_bank(bank);

            self.reader.seek(SeekFrom::Start(resume))?;
        }

        debug!(
            "Read {} banks with {} entries",
            archive.banks().len(),
            archive.entry_count()
        );
        Ok(archive)
    }

    fn read_bank(&mut self, record: &BankRecord) -> BigResult<Bank> {
        debug!(
            "Bank {} (id={}): {} entries at {:#x}, block_size={}",
            record.name, record.id, record.entry_count, record.entry_table_offset, record.block_size
        );
        let mut bank = Bank::from_record(record)?;

        self.reader
            .seek(SeekFrom::Start(u64::from(record.entry_table_offset)))?;
        let type_count = u32::read_le(&mut self.reader)?;
        self.reader.seek(SeekFrom::Current(
            (u64::from(type_count) * TYPE_RECORD_SIZE) as i64,
        ))?;

        for index in 0..record.entry_count {
            let entry_record = EntryRecord::read(&mut self.reader)?;
            if entry_record.has_name_anomaly() {
                warn!(
                    "Entry {} in bank {} has a name with NUL or non-ASCII bytes: {:02x?}",
                    index, record.name, entry_record.name
                );
            }
            trace!(
                "Entry {}: id={}, type={}, length={}, offset={:#x}",
                String::from_utf8_lossy(&entry_record.name),
                entry_record.id,
                entry_record.entry_type,
                entry_record.length,
                entry_record.data_offset
            );

            bank.add_entry(Entry::from_record(
                entry_record,
                self.source_path.as_deref(),
            )?);
        }

        Ok(bank)
    }
}

impl ArchiveReader<BufReader<File>> {
    /// Open an archive file; its path becomes the payload source of every entry
    pub fn open<P: AsRef<Path>>(path: P) -> BigResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::with_source_path(BufReader::new(file), path))
    }
}
