use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
pub struct Args {
    /// Validate that each reference sequence's features are sorted before querying.
    #[arg(long)]
    pub validate: bool,

    /// Output destination.
    ///
    /// If not set, features are written to stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Input features (BED). May be gzip-compressed.
    pub src: PathBuf,

    /// Input queries.
    ///
    /// Each line is either `<name> <start> <end>` (0-based, half-open) or a region string
    /// `<name>[:<start>[-<end>]]` (1-based, closed). May be gzip-compressed.
    pub queries: PathBuf,
}
