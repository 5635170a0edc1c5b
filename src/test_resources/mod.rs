//! In-memory fonts and WOFF files for tests

use std::io::Write;

use bytes::{Buf, BufMut};
use flate2::{write::ZlibEncoder, Compression};
use four_cc::FourCC;

use crate::{
    buffer_util::{round_up_to_four, BufExt},
    checksum::calculate_table_checksum,
    magic_numbers::{WOFF_HEADER_SIZE, WOFF_SIGNATURE, WOFF_TABLE_ENTRY_SIZE},
    ttf_header::{calculate_header_size, TableRecord},
};

/// The `head`, `hhea` and `maxp` tables of a font with a single empty glyph.
pub fn minimal_font_tables() -> Vec<(FourCC, Vec<u8>)> {
    let mut head = Vec::with_capacity(54);
    head.put_u32(0x0001_0000); // version
    head.put_u32(0x0001_0000); // font revision
    head.put_u32(0); // checksum adjustment
    head.put_u32(0x5F0F_3CF5); // magic number
    head.put_u16(0); // flags
    head.put_u16(1000); // units per em
    head.put_u64(0); // created
    head.put_u64(0); // modified
    head.put_bytes(0, 8); // bounding box
    head.put_u16(0); // mac style
    head.put_u16(8); // lowest rec ppem
    head.put_i16(2); // font direction hint
    head.put_i16(0); // index to loc format
    head.put_i16(0); // glyph data format

    let mut hhea = Vec::with_capacity(36);
    hhea.put_u32(0x0001_0000); // version
    hhea.put_i16(800); // ascender
    hhea.put_i16(-200); // descender
    hhea.put_i16(0); // line gap
    hhea.put_u16(1000); // advance width max
    hhea.put_bytes(0, 22);
    hhea.put_u16(1); // number of h metrics

    let mut maxp = Vec::with_capacity(6);
    maxp.put_u32(0x0000_5000); // version 0.5
    maxp.put_u16(1); // num glyphs

    vec![
        (FourCC(*b"head"), head),
        (FourCC(*b"hhea"), hhea),
        (FourCC(*b"maxp"), maxp),
    ]
}

pub fn zlib_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Packs sfnt tables into a WOFF file.
pub struct WoffBuilder {
    flavor: FourCC,
    tables: Vec<(FourCC, Vec<u8>)>,
    compress: bool,
    reverse_data: bool,
}

impl WoffBuilder {
    pub fn new(flavor: FourCC, tables: Vec<(FourCC, Vec<u8>)>) -> Self {
        WoffBuilder {
            flavor,
            tables,
            compress: false,
            reverse_data: false,
        }
    }

    /// Compress every table that gets smaller with zlib.
    pub fn compressed(mut self) -> Self {
        self.compress = true;
        self
    }

    /// Store the table data in the opposite order of the table directory.
    pub fn reverse_data(mut self) -> Self {
        self.reverse_data = true;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let num_tables = self.tables.len();
        let stored: Vec<Vec<u8>> = self
            .tables
            .iter()
            .map(|(_, data)| {
                let compressed = zlib_compress(data);
                if self.compress && compressed.len() < data.len() {
                    compressed
                } else {
                    data.clone()
                }
            })
            .collect();

        let mut data_order: Vec<usize> = (0..num_tables).collect();
        if self.reverse_data {
            data_order.reverse();
        }
        let mut offsets = vec![0u32; num_tables];
        let mut offset = (WOFF_HEADER_SIZE + WOFF_TABLE_ENTRY_SIZE * num_tables) as u32;
        for &idx in &data_order {
            offsets[idx] = offset;
            offset = round_up_to_four(offset + stored[idx].len() as u32).unwrap();
        }
        let total_sfnt_size = self.tables.iter().fold(
            calculate_header_size(num_tables) as u32,
            |size, (_, data)| size + round_up_to_four(data.len() as u32).unwrap(),
        );

        let mut woff = Vec::with_capacity(offset as usize);
        woff.put_slice(&WOFF_SIGNATURE.0);
        woff.put_slice(&self.flavor.0);
        woff.put_u32(offset);
        woff.put_u16(num_tables as u16);
        woff.put_u16(0);
        woff.put_u32(total_sfnt_size);
        woff.put_u16(1);
        woff.put_u16(0);
        woff.put_bytes(0, 20); // no metadata or private data

        for (idx, (tag, data)) in self.tables.iter().enumerate() {
            woff.put_slice(&tag.0);
            woff.put_u32(offsets[idx]);
            woff.put_u32(stored[idx].len() as u32);
            woff.put_u32(data.len() as u32);
            woff.put_u32(calculate_table_checksum(*tag, data));
        }
        for &idx in &data_order {
            assert_eq!(offsets[idx] as usize, woff.len());
            woff.put_slice(&stored[idx]);
            woff.resize((woff.len() + 3) & !3, 0);
        }
        woff
    }
}

/// Reads the table records of an sfnt font.
pub fn read_sfnt_tables(font: &[u8]) -> Vec<TableRecord> {
    let mut buffer = &font[4..];
    let num_tables = buffer.get_u16();
    buffer.advance(6);
    (0..num_tables)
        .map(|_| TableRecord {
            tag: buffer.try_get_four_cc().unwrap(),
            checksum: buffer.get_u32(),
            offset: buffer.get_u32(),
            length: buffer.get_u32(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use four_cc::FourCC;

    use super::{minimal_font_tables, WoffBuilder};

    #[test]
    fn minimal_tables_have_expected_sizes() {
        let sizes: Vec<_> = minimal_font_tables()
            .iter()
            .map(|(_, data)| data.len())
            .collect();
        assert_eq!(vec![54, 36, 6], sizes);
    }

    #[test]
    fn compressed_woff_is_smaller() {
        let tables = minimal_font_tables();
        let stored = WoffBuilder::new(FourCC([0, 1, 0, 0]), tables.clone()).build();
        let compressed = WoffBuilder::new(FourCC([0, 1, 0, 0]), tables)
            .compressed()
            .build();
        assert!(compressed.len() < stored.len());
        assert_eq!(0, stored.len() % 4);
    }
}
