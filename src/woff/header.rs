//! The WOFF header

use bytes::{Buf, TryGetError};
use four_cc::FourCC;
use thiserror::Error;

use crate::{
    buffer_util::BufExt,
    magic_numbers::{WOFF_HEADER_SIZE, WOFF_SIGNATURE},
};

#[derive(Error, Debug)]
pub enum WoffHeaderError {
    #[error("Truncated header")]
    Truncated,
    #[error("Invalid magic word")]
    InvalidMagicWord,
    #[error("Reserved field is not zero")]
    NonZeroReserved,
}

impl From<TryGetError> for WoffHeaderError {
    fn from(_: TryGetError) -> Self {
        WoffHeaderError::Truncated
    }
}

/// The fixed size header at the start of a WOFF 1.0 file.
#[derive(Debug, Clone)]
pub struct WoffHeader {
    pub signature: FourCC,
    /// The sfnt version of the wrapped font
    pub flavor: FourCC,
    pub length: u32,
    pub num_tables: u16,
    pub reserved: u16,
    /// Declared size of the decoded font. Not relied upon when laying out the output.
    pub total_sfnt_size: u32,
    pub major_version: u16,
    pub minor_version: u16,
    pub meta_offset: u32,
    pub meta_length: u32,
    pub meta_orig_length: u32,
    pub private_offset: u32,
    pub private_length: u32,
}

impl WoffHeader {
    pub const SIZE: usize = WOFF_HEADER_SIZE;

    pub fn from_buf(buffer: &mut impl Buf) -> Result<Self, WoffHeaderError> {
        Ok(Self {
            signature: buffer.try_get_four_cc()?,
            flavor: buffer.try_get_four_cc()?,
            length: buffer.try_get_u32()?,
            num_tables: buffer.try_get_u16()?,
            reserved: buffer.try_get_u16()?,
            total_sfnt_size: buffer.try_get_u32()?,
            major_version: buffer.try_get_u16()?,
            minor_version: buffer.try_get_u16()?,
            meta_offset: buffer.try_get_u32()?,
            meta_length: buffer.try_get_u32()?,
            meta_orig_length: buffer.try_get_u32()?,
            private_offset: buffer.try_get_u32()?,
            private_length: buffer.try_get_u32()?,
        })
    }

    pub fn is_valid_header(&self) -> Result<(), WoffHeaderError> {
        if self.signature != WOFF_SIGNATURE {
            return Err(WoffHeaderError::InvalidMagicWord);
        }
        if self.reserved != 0 {
            return Err(WoffHeaderError::NonZeroReserved);
        }
        Ok(())
    }
}
