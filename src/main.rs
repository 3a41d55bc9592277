//! docheader: normalize the leading doc comment of source files.
//!
//! Meant to run from a pre-commit hook with the staged paths:
//!
//! ```text
//! docheader src/Widget.cpp src/main.cpp
//! ```
//!
//! Each file's leading `/* ... */` comment is rewritten to:
//!
//! 1. `\class <Name>` (skipped for the entry-point file)
//! 2. the existing free-form description
//! 3. `\authors` from `git log`, plus the current user if the file is dirty
//! 4. `\date` of the last commit, or today if the file is dirty
//!
//! Files are only written when the result differs from what is on disk.

mod comment;
mod directive;
mod error;
mod normalize;
mod vcs;

use clap::Parser;
use normalize::{Normalizer, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "docheader",
    version,
    about = "Normalize leading doc comments (class, authors, date) from git history"
)]
struct Cli {
    /// Files whose header should be normalized
    files: Vec<PathBuf>,

    /// Base file name (without extension) that gets no \class directive
    #[arg(long, env = "DOCHEADER_ENTRY_POINT", default_value = "main")]
    entry_point: String,

    /// git executable to run
    #[arg(long, env = "DOCHEADER_GIT", default_value = "git")]
    git: PathBuf,

    /// Report files whose header would change without writing them
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("docheader={level}")));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        println!("No files to update");
        return ExitCode::SUCCESS;
    }

    let settings = Settings {
        entry_point: cli.entry_point,
        check: cli.check,
    };
    let today = chrono::Local::now().date_naive();
    let normalizer = Normalizer::new(vcs::Git::new(cli.git), settings, today);
    let report = normalizer.run(&cli.files);

    tracing::debug!(
        updated = report.updated.len(),
        unchanged = report.unchanged.len(),
        pending = report.pending.len(),
        failed = report.failures.len(),
        "done"
    );

    for failure in &report.failures {
        if failure.kind() == Some(error::ErrorKind::MissingHeader) {
            eprintln!(
                "hint: start {} with a /* ... */ comment describing it",
                failure.path.display()
            );
        }
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paths_and_defaults() {
        let cli = Cli::try_parse_from(["docheader", "a.cpp", "b.h"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.cpp"), PathBuf::from("b.h")]);
        assert!(!cli.check);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_no_paths() {
        let cli = Cli::try_parse_from(["docheader"]).unwrap();
        assert!(cli.files.is_empty());
    }

    #[test]
    fn parses_options() {
        let cli = Cli::try_parse_from([
            "docheader",
            "--entry-point",
            "app",
            "--git",
            "/usr/bin/git",
            "--check",
            "-vv",
            "x.cpp",
        ])
        .unwrap();
        assert_eq!(cli.entry_point, "app");
        assert_eq!(cli.git, PathBuf::from("/usr/bin/git"));
        assert!(cli.check);
        assert_eq!(cli.verbose, 2);
    }
}
