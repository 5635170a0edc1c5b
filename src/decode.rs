//! Interface for decoding WOFF files

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use four_cc::FourCC;
use log::{debug, trace, warn};
use thiserror::Error;

use crate::{
    buffer_util::{ReadExt, WriteExt},
    magic_numbers::{TTF_CFF_FLAVOR, TTF_TRUE_TYPE_FLAVOR},
    woff::{
        header::{WoffHeader, WoffHeaderError},
        table_data::{decode_table_data, verify_checksum, TableDataError},
        table_directory::{TableDirectoryError, WoffTableDirectory},
    },
};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Truncated input")]
    TruncatedInput,
    #[error("Corrupt data in table {tag:?}: {reason}")]
    CorruptTableData { tag: FourCC, reason: TableDataError },
    #[error("Invalid Woff File {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => DecodeError::TruncatedInput,
            _ => DecodeError::Io(e),
        }
    }
}

impl From<WoffHeaderError> for DecodeError {
    fn from(e: WoffHeaderError) -> Self {
        match e {
            WoffHeaderError::Truncated => DecodeError::TruncatedInput,
            _ => DecodeError::Invalid(e.to_string()),
        }
    }
}

impl From<TableDirectoryError> for DecodeError {
    fn from(e: TableDirectoryError) -> Self {
        match e {
            TableDirectoryError::Truncated => DecodeError::TruncatedInput,
            _ => DecodeError::Invalid(e.to_string()),
        }
    }
}

/// What to do when a decoded table does not match its directory checksum.
///
/// Checksums are always copied to the output unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Don't compute checksums
    #[default]
    Ignore,
    /// Log a warning and keep going
    Warn,
    /// Fail with [`DecodeError::CorruptTableData`]
    Reject,
}

#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    /// Reject files with a wrong signature, a non-zero reserved field, or tables that are larger
    /// compressed than uncompressed.
    pub strict: bool,
    pub checksum_policy: ChecksumPolicy,
}

/// Converts the WOFF font read from `input` into an OpenType font written to `output`.
///
/// `input` must be positioned at the start of the WOFF file; `output` is written at absolute
/// offsets and flushed before returning. On error, anything already written to `output` is not a
/// valid font.
pub fn convert_woff_to_otf<R, W>(input: &mut R, output: &mut W) -> Result<(), DecodeError>
where
    R: Read + Seek,
    W: Write + Seek,
{
    convert_woff_to_otf_with_options(input, output, &DecodeOptions::default())
}

/// Converts a WOFF font in `input_buffer` into an OpenType font.
pub fn convert_woff_to_otf_bytes(input_buffer: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut output = Cursor::new(Vec::new());
    convert_woff_to_otf(&mut Cursor::new(input_buffer), &mut output)?;
    Ok(output.into_inner())
}

pub fn convert_woff_to_otf_with_options<R, W>(
    input: &mut R,
    output: &mut W,
    options: &DecodeOptions,
) -> Result<(), DecodeError>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let header = WoffHeader::from_buf(&mut &input.read_block(WoffHeader::SIZE)?[..])?;
    debug!(
        "WOFF {}.{} with {} tables, flavor {:?}, {} bytes",
        header.major_version, header.minor_version, header.num_tables, header.flavor, header.length
    );
    if options.strict {
        header.is_valid_header()?;
    }
    if !matches!(header.flavor, TTF_TRUE_TYPE_FLAVOR | TTF_CFF_FLAVOR) {
        debug!("Unknown font flavor {:?}", header.flavor);
    }

    let directory_size = WoffTableDirectory::size(header.num_tables);
    let table_directory = WoffTableDirectory::from_buf(
        &mut &input.read_block(directory_size)?[..],
        header.num_tables,
    )?;
    if options.strict {
        table_directory.validate()?;
    }

    let ttf_header = table_directory.to_table_directory(header.flavor)?;
    if ttf_header.total_size() != header.total_sfnt_size as u64 {
        debug!(
            "Header declares {} bytes of sfnt data, laid out {}",
            header.total_sfnt_size,
            ttf_header.total_size()
        );
    }

    // the records hold forward references, so they go out before any table data
    output.seek(SeekFrom::Start(0))?;
    output.write_all(&ttf_header.to_bytes())?;

    for (table, record) in table_directory.tables.iter().zip(ttf_header.table_records()) {
        trace!(
            "Table {:?}: {} bytes at {} -> {} bytes at {}{}",
            table.tag,
            table.compressed_length,
            table.offset,
            record.length,
            record.offset,
            if table.is_compressed() { " (compressed)" } else { "" }
        );
        input.seek(SeekFrom::Start(table.offset as u64))?;
        let stored = input.read_block(table.compressed_length as usize)?;
        let corrupt = |reason| DecodeError::CorruptTableData {
            tag: table.tag,
            reason,
        };
        let data = decode_table_data(table, stored).map_err(corrupt)?;

        match options.checksum_policy {
            ChecksumPolicy::Ignore => {}
            ChecksumPolicy::Warn => {
                if let Err(e) = verify_checksum(table, &data) {
                    warn!("Table {:?}: {}", table.tag, e);
                }
            }
            ChecksumPolicy::Reject => verify_checksum(table, &data).map_err(corrupt)?,
        }

        output.seek(SeekFrom::Start(record.offset as u64))?;
        output.write_all(&data)?;
        output.write_padding(record.offset as u64 + record.length as u64)?;
    }

    output.flush()?;
    Ok(())
}
