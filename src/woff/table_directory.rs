//! The WOFF table directory

use bytes::{Buf, TryGetError};
use four_cc::FourCC;
use thiserror::Error;

use crate::{
    buffer_util::{round_up_to_four, BufExt},
    magic_numbers::WOFF_TABLE_ENTRY_SIZE,
    ttf_header::{calculate_header_size, TableDirectory, TableRecord},
};

#[derive(Error, Debug)]
pub enum TableDirectoryError {
    #[error("Table Directory truncated")]
    Truncated,
    #[error("Table {0:?} is larger compressed than uncompressed")]
    CompressedLargerThanOriginal(FourCC),
    #[error("Table {0:?} does not fit in a 32-bit offset")]
    OffsetOverflow(FourCC),
}

impl From<TryGetError> for TableDirectoryError {
    fn from(_: TryGetError) -> Self {
        TableDirectoryError::Truncated
    }
}

/// A WOFF table directory.
pub struct WoffTableDirectory {
    pub tables: Vec<WoffTableDirectoryEntry>,
}

impl WoffTableDirectory {
    /// Size in bytes of a directory with `num_tables` entries
    pub fn size(num_tables: u16) -> usize {
        WOFF_TABLE_ENTRY_SIZE * num_tables as usize
    }

    /// Read the table directory from the buffer, keeping the entries in file order.
    pub fn from_buf(buffer: &mut impl Buf, num_tables: u16) -> Result<Self, TableDirectoryError> {
        let tables = (0..num_tables)
            .map(|_| WoffTableDirectoryEntry::from_buf(buffer))
            .collect::<Result<_, _>>()?;
        Ok(WoffTableDirectory { tables })
    }

    /// Checks the constraints that lenient decoding lets through.
    pub fn validate(&self) -> Result<(), TableDirectoryError> {
        match self.tables.iter().find(|table| !table.is_valid()) {
            Some(table) => Err(TableDirectoryError::CompressedLargerThanOriginal(table.tag)),
            None => Ok(()),
        }
    }

    /// Lays out the tables of the output font.
    ///
    /// Table data starts right after the table records and every table begins on a four byte
    /// boundary. Records keep the order of the WOFF directory.
    pub fn to_table_directory(&self, flavor: FourCC) -> Result<TableDirectory, TableDirectoryError> {
        let header_size = calculate_header_size(self.tables.len());
        let mut offset = u32::try_from(header_size)
            .map_err(|_| TableDirectoryError::OffsetOverflow(flavor))?;
        let mut table_records = Vec::with_capacity(self.tables.len());
        for table in &self.tables {
            table_records.push(TableRecord {
                tag: table.tag,
                checksum: table.original_checksum,
                offset,
                length: table.original_length,
            });
            offset = offset
                .checked_add(table.original_length)
                .and_then(round_up_to_four)
                .ok_or(TableDirectoryError::OffsetOverflow(table.tag))?;
        }
        Ok(TableDirectory::new(flavor, table_records))
    }
}

/// A WOFF table directory entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WoffTableDirectoryEntry {
    pub tag: FourCC,
    /// Offset of the table data from the start of the WOFF file
    pub offset: u32,
    /// Length of the table data as stored in the WOFF file
    pub compressed_length: u32,
    /// Length of the decoded table
    pub original_length: u32,
    /// Checksum of the decoded table, copied into the output as is
    pub original_checksum: u32,
}

impl WoffTableDirectoryEntry {
    fn from_buf(buffer: &mut impl Buf) -> Result<Self, TableDirectoryError> {
        Ok(WoffTableDirectoryEntry {
            tag: buffer.try_get_four_cc()?,
            offset: buffer.try_get_u32()?,
            compressed_length: buffer.try_get_u32()?,
            original_length: buffer.try_get_u32()?,
            original_checksum: buffer.try_get_u32()?,
        })
    }

    /// Tables that did not shrink are stored without compression.
    pub fn is_compressed(&self) -> bool {
        self.compressed_length != self.original_length
    }

    fn is_valid(&self) -> bool {
        self.compressed_length <= self.original_length
    }
}
