use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Dump the header and constant pool of a class file", long_about = None)]
pub struct Cli {
    /// The class file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only print the fixed header fields and access flags
    #[arg(long)]
    pub no_pool: bool,

    /// Raise the log level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
