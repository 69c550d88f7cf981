pub mod extract;

use clap::Parser;

/// Extract the features that start in query regions.
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub args: extract::Args,
}
