use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use clap::{ArgEnum, Parser};
use thiserror::Error;
use woff_sfnt::{convert_woff_to_otf_with_options, ChecksumPolicy, DecodeError, DecodeOptions};

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Woff(#[from] DecodeError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, ArgEnum)]
enum Checksums {
    Ignore,
    Warn,
    Reject,
}

impl From<Checksums> for ChecksumPolicy {
    fn from(checksums: Checksums) -> Self {
        match checksums {
            Checksums::Ignore => ChecksumPolicy::Ignore,
            Checksums::Warn => ChecksumPolicy::Warn,
            Checksums::Reject => ChecksumPolicy::Reject,
        }
    }
}

#[derive(Debug, Parser)]
struct Args {
    in_path: PathBuf,
    out_path: PathBuf,
    /// Reject WOFF files with malformed headers
    #[clap(long)]
    strict: bool,
    #[clap(long, arg_enum, default_value = "ignore")]
    checksums: Checksums,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();
    let options = DecodeOptions {
        strict: args.strict,
        checksum_policy: args.checksums.into(),
    };
    let mut input = File::open(args.in_path)?;
    let mut output = BufWriter::new(File::create(args.out_path)?);
    convert_woff_to_otf_with_options(&mut input, &mut output, &options)?;
    Ok(())
}
