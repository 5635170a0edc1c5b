//! Inflating and checking WOFF table data

use std::io::{self, Read};

use flate2::read::DeflateDecoder;
use thiserror::Error;

use crate::{
    checksum::calculate_table_checksum, magic_numbers::ZLIB_HEADER_SIZE,
    woff::table_directory::WoffTableDirectoryEntry,
};

#[derive(Error, Debug)]
pub enum TableDataError {
    #[error("Compressed data too short for a zlib header")]
    MissingZlibHeader,
    #[error("Invalid deflate stream: {0}")]
    Inflate(io::Error),
    #[error("Decompressed to {actual} bytes, expected {expected}")]
    LengthMismatch { expected: u32, actual: u64 },
    #[error("Checksum {actual:#010x} does not match {expected:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

/// Turns the table data as stored in the WOFF file into the decoded table.
pub fn decode_table_data(
    table: &WoffTableDirectoryEntry,
    data: Vec<u8>,
) -> Result<Vec<u8>, TableDataError> {
    if table.is_compressed() {
        inflate(&data, table.original_length)
    } else {
        Ok(data)
    }
}

/// Decodes a zlib-wrapped table to exactly `original_length` bytes.
pub fn inflate(compressed: &[u8], original_length: u32) -> Result<Vec<u8>, TableDataError> {
    let deflate_data = compressed
        .get(ZLIB_HEADER_SIZE..)
        .ok_or(TableDataError::MissingZlibHeader)?;
    let mut decoded = Vec::with_capacity(original_length as usize);
    // one extra byte so that oversized streams are noticed
    DeflateDecoder::new(deflate_data)
        .take(original_length as u64 + 1)
        .read_to_end(&mut decoded)
        .map_err(TableDataError::Inflate)?;
    if decoded.len() as u64 != original_length as u64 {
        return Err(TableDataError::LengthMismatch {
            expected: original_length,
            actual: decoded.len() as u64,
        });
    }
    Ok(decoded)
}

/// Compares the decoded table against the checksum from the table directory.
pub fn verify_checksum(table: &WoffTableDirectoryEntry, data: &[u8]) -> Result<(), TableDataError> {
    let actual = calculate_table_checksum(table.tag, data);
    if actual == table.original_checksum {
        Ok(())
    } else {
        Err(TableDataError::ChecksumMismatch {
            expected: table.original_checksum,
            actual,
        })
    }
}
