//! Types representing WOFF headers, table directories, and table data.

pub mod header;
pub mod table_data;
pub mod table_directory;
