//! pagepush CLI - write local HTML to a Confluence page.
//!
//! Reads the page's current version and parent, then puts the new body
//! back as the next version:
//!
//! ```text
//! pagepush [-u USER] [-t TITLE] [-f FILE] PAGEID [HTML]
//! ```

mod commands;
mod error;
mod output;

use std::error::Error as _;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::WriteArgs;
use output::Output;

/// Write HTML content or a new title to a Confluence page.
#[derive(Parser)]
#[command(name = "pagepush", version, about)]
struct Cli {
    #[command(flatten)]
    write: WriteArgs,

    /// Enable info-level logging.
    #[arg(short, long)]
    verbose: bool,
}

/// `--verbose` forces INFO, otherwise `rust_log` directives apply over a WARN default.
fn log_filter(verbose: bool, rust_log: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(rust_log)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, &rust_log))
        .with_writer(std::io::stderr)
        .init();

    match cli.write.execute(&output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            let mut source = err.source();
            while let Some(cause) = source {
                output.error(&format!("  caused by: {cause}"));
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(false, "").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert_eq!(
            log_filter(false, "debug").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_log_filter_ignores_invalid_directives() {
        assert_eq!(
            log_filter(false, "pagepush=lolwut").max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }

    #[test]
    fn test_verbose_forces_info() {
        assert_eq!(
            log_filter(true, "trace").max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
