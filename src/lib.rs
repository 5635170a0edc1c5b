#![doc = include_str!("../readme.md")]
pub mod decode;
pub mod ttf_header;
pub mod woff;

mod buffer_util;
mod checksum;
mod magic_numbers;

#[cfg(test)]
mod test_resources;

pub use decode::{
    convert_woff_to_otf, convert_woff_to_otf_bytes, convert_woff_to_otf_with_options,
    ChecksumPolicy, DecodeError, DecodeOptions,
};
