//! Types representing OpenType table directories

use bytes::BufMut;
use four_cc::FourCC;

/// Calculates the size of the OpenType table directory
pub fn calculate_header_size(num_tables: usize) -> usize {
    // sfnt_version:   4 bytes
    // num_tables:     2 bytes
    // search_range:   2 bytes
    // entry_selector: 2 bytes
    // range_shift:    2 bytes
    // table_records:  size_of::<TableRecord>() * num_tables
    12 + std::mem::size_of::<TableRecord>() * num_tables
}

/// The binary search hints of the OpenType table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchParams {
    pub fn new(num_tables: u16) -> Self {
        if num_tables == 0 {
            return SearchParams {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }
        // floor(log2(num_tables))
        let entry_selector = 15 - num_tables.leading_zeros();
        // (2**entry_selector) * 16
        let search_range = 1u32 << (entry_selector + 4);
        // num_tables * 16 - search_range
        let range_shift = ((num_tables as u32) << 4) - search_range;
        // only fonts with more than 4095 tables overflow the 16 bit fields
        SearchParams {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

/// An OpenType table directory
pub struct TableDirectory {
    sfnt_version: FourCC,
    num_tables: u16,
    search_params: SearchParams,
    table_records: Vec<TableRecord>,
}

impl TableDirectory {
    /// Build a new table directory, keeping the table records in the given order.
    ///
    /// Callers must supply no more than `u16::MAX` records.
    pub fn new(sfnt_version: FourCC, table_records: Vec<TableRecord>) -> Self {
        let num_tables = u16::try_from(table_records.len()).unwrap_or(u16::MAX);
        TableDirectory {
            sfnt_version,
            num_tables,
            search_params: SearchParams::new(num_tables),
            table_records,
        }
    }

    pub fn sfnt_version(&self) -> FourCC {
        self.sfnt_version
    }

    pub fn search_params(&self) -> SearchParams {
        self.search_params
    }

    pub fn table_records(&self) -> &[TableRecord] {
        &self.table_records
    }

    /// Size of the offset table and the table records
    pub fn header_size(&self) -> usize {
        calculate_header_size(self.table_records.len())
    }

    /// Size of the complete font, including the padding after the last table.
    pub fn total_size(&self) -> u64 {
        self.table_records
            .iter()
            .map(|table| table.padded_end())
            .max()
            .unwrap_or(0)
            .max(self.header_size() as u64)
    }

    pub fn write_to_buf(&self, buffer: &mut impl BufMut) {
        assert!(buffer.remaining_mut() >= self.header_size());
        buffer.put_slice(&self.sfnt_version.0);
        buffer.put_u16(self.num_tables);
        buffer.put_u16(self.search_params.search_range);
        buffer.put_u16(self.search_params.entry_selector);
        buffer.put_u16(self.search_params.range_shift);
        for table in &self.table_records {
            table.write_to_buf(buffer);
        }
    }

    /// Serializes the offset table and table records.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.header_size());
        self.write_to_buf(&mut buffer);
        buffer
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: FourCC,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    pub fn write_to_buf(&self, buffer: &mut impl BufMut) {
        buffer.put_slice(&self.tag.0);
        buffer.put_u32(self.checksum);
        buffer.put_u32(self.offset);
        buffer.put_u32(self.length);
    }

    pub fn get_range(&self) -> std::ops::Range<usize> {
        self.offset as usize..self.offset as usize + self.length as usize
    }

    /// End of the table data once padded to a four byte boundary
    pub fn padded_end(&self) -> u64 {
        (self.offset as u64 + self.length as u64 + 3) & !3
    }
}
