use std::num::Wrapping;

use bytes::BufMut;
use four_cc::FourCC;
use thiserror::Error;

use crate::magic_numbers::HEAD_TAG;

/// Calculates the sum of (big-endian) `u32`s in a block of data.
///
/// If the data is not a multiple of 4 bytes long, it is treated as if padded with zeroes at the
/// end.
pub fn calculate_checksum(data: &[u8]) -> u32 {
    let chunks = data.chunks_exact(4);
    let last = u32::from_be_bytes(match chunks.remainder() {
        &[] => [0; 4],
        &[b0] => [b0, 0, 0, 0],
        &[b0, b1] => [b0, b1, 0, 0],
        &[b0, b1, b2] => [b0, b1, b2, 0],
        _ => unreachable!("ChunksExact::remainder is guaranteed to return a slice of length < n"),
    });
    (chunks
        .map(|slice| Wrapping(u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]])))
        .sum::<Wrapping<u32>>()
        + Wrapping(last))
    .0
}

/// Calculates the checksum the table directory should carry for the table `tag`.
///
/// The `head` table is summed with its `checksum_adjustment` field set to zero.
pub fn calculate_table_checksum(tag: FourCC, data: &[u8]) -> u32 {
    if tag == HEAD_TAG && data.len() >= 12 {
        let mut head_table = data.to_vec();
        // cannot fail, length checked above
        let _ = set_checksum_adjustment(&mut head_table, 0);
        calculate_checksum(&head_table)
    } else {
        calculate_checksum(data)
    }
}

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("Truncated `head` table")]
    Truncated,
}

/// Sets the `checksum_adjustment` field in the `head` table to the specified value.
pub fn set_checksum_adjustment(head_table: &mut [u8], value: u32) -> Result<(), ChecksumError> {
    // table version: 4 bytes
    // font revision: 4 bytes
    // checksum adjustment: 4 bytes
    if head_table.len() < 12 {
        return Err(ChecksumError::Truncated);
    }
    let mut checksum_field = &mut head_table[8..12];
    checksum_field.put_u32(value);
    Ok(())
}
