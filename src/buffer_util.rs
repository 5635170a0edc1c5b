use std::io::{self, Read, Write};

use bytes::{Buf, TryGetError};
use four_cc::FourCC;

pub trait BufExt {
    fn try_get_four_cc(&mut self) -> Result<FourCC, TryGetError>;
}

impl<B> BufExt for B
where
    B: Buf,
{
    fn try_get_four_cc(&mut self) -> Result<FourCC, TryGetError> {
        let mut dest = [0; 4];
        self.try_copy_to_slice(&mut dest)?;
        Ok(FourCC(dest))
    }
}

/// Stream reading helpers for seekable font sources.
pub trait ReadExt: Read {
    /// Reads exactly `len` bytes.
    ///
    /// A stream that ends early produces an [`io::ErrorKind::UnexpectedEof`] error.
    fn read_block(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut block = Vec::new();
        let read = Read::take(&mut *self, len as u64).read_to_end(&mut block)?;
        if read != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {len} bytes, stream ended after {read}"),
            ));
        }
        Ok(block)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}

pub trait WriteExt: Write {
    /// Writes the zero bytes needed to bring `end_offset` to a multiple of four.
    fn write_padding(&mut self, end_offset: u64) -> io::Result<()> {
        const ZEROS: [u8; 3] = [0; 3];
        self.write_all(&ZEROS[..padding_len(end_offset)])
    }
}

impl<W: Write + ?Sized> WriteExt for W {}

/// Number of zero bytes (0 to 3) that align `end_offset` to four bytes.
pub fn padding_len(end_offset: u64) -> usize {
    ((4 - (end_offset & 3)) & 3) as usize
}

/// Rounds up to a multiple of four, or `None` on overflow.
pub fn round_up_to_four(value: u32) -> Option<u32> {
    value.checked_add(3).map(|value| value & !3)
}
