use std::{fs::File, io, path::Path, process::exit};

use anyhow::{Context, Result};
use args::Cli;
use classdump_class_file::ClassHeader;
use clap::Parser;
use log::{debug, LevelFilter};

use crate::report::Reporter;

mod args;
mod report;

fn main() {
    let program = std::env::args_os()
        .next()
        .map(|arg0| program_name(Path::new(&arg0)))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let args = Cli::parse();
    init_logging(args.verbose);

    let reporter = Reporter::new(program);
    let header = match read_class_file(&args.file) {
        Ok(header) => header,
        Err(err) => {
            let _ = reporter.failure(&mut io::stderr().lock(), &err);
            exit(1);
        }
    };

    if let Err(err) = reporter.render(&mut io::stdout().lock(), &header, !args.no_pool) {
        let _ = reporter.failure(&mut io::stderr().lock(), &err.into());
        exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn read_class_file(path: &Path) -> Result<ClassHeader> {
    debug!("opening '{}'", path.display());
    let file = File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;

    ClassHeader::parse(file)
        .with_context(|| format!("failed to read class file '{}'", path.display()))
}

/// Last path component of the invocation path, or the path itself if it has none.
fn program_name(invocation: &Path) -> String {
    invocation
        .file_name()
        .unwrap_or(invocation.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_is_basename() {
        assert_eq!("classdump", program_name(Path::new("/usr/local/bin/classdump")));
        assert_eq!("classdump", program_name(Path::new("./classdump")));
        assert_eq!("classdump", program_name(Path::new("classdump")));
        assert_eq!("", program_name(Path::new("")));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_class_file(Path::new("/nonexistent/Missing.class")).unwrap_err();
        assert!(format!("{:#}", err).starts_with("failed to open '/nonexistent/Missing.class'"));
    }
}
