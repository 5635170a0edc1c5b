use four_cc::FourCC;

pub const WOFF_SIGNATURE: FourCC = FourCC(*b"wOFF");
pub const TTF_TRUE_TYPE_FLAVOR: FourCC = FourCC([0, 1, 0, 0]);
pub const TTF_CFF_FLAVOR: FourCC = FourCC(*b"OTTO");

pub const HEAD_TAG: FourCC = FourCC(*b"head");

/// Size of the fixed WOFF 1.0 header
pub const WOFF_HEADER_SIZE: usize = 44;
/// Size of a single WOFF 1.0 table directory entry
pub const WOFF_TABLE_ENTRY_SIZE: usize = 20;
/// Size of the zlib header preceding the DEFLATE data of a compressed table
pub const ZLIB_HEADER_SIZE: usize = 2;
