//! CLI parsing and dispatch.

use crate::constants;
use crate::core::client::ListMethod;
use crate::util::url;
use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

pub mod export;

/// Shared context passed to the command handler.
pub struct CliContext {
    pub target: String,
    pub output: PathBuf,
    pub list_method: ListMethod,
    pub pause: Duration,
}

#[derive(Parser, Debug)]
#[command(
    name = "vault-ad-groups",
    version,
    about = "Export Vault identity groups and their policies across all namespaces to CSV"
)]
pub struct Cli {
    /// Vault address, e.g. https://vault.example.com:8200
    #[arg(value_parser = url::normalize_target)]
    pub target: String,

    /// Output CSV file
    #[arg(long, value_name = "PATH", default_value = constants::DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// HTTP method for listing calls (list = LIST verb, get = GET with ?list=true)
    #[arg(long, value_enum, default_value_t = ListMethod::List)]
    pub list_method: ListMethod,

    /// Seconds to pause after each namespace (0 disables)
    #[arg(long, value_name = "SECS", default_value_t = constants::DEFAULT_DELAY_SECS)]
    pub delay_secs: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let ctx = CliContext {
            target: self.target,
            output: self.output,
            list_method: self.list_method,
            pause: Duration::from_secs(self.delay_secs),
        };

        export::run(&ctx)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // Stage errors are part of the tool's stdout report.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["vault-ad-groups", "https://vault.example.com/"]).unwrap();
        assert_eq!(cli.target, "https://vault.example.com");
        assert_eq!(cli.output, PathBuf::from(constants::DEFAULT_OUTPUT_FILE));
        assert_eq!(cli.list_method, ListMethod::List);
        assert_eq!(cli.delay_secs, 2);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_missing_target_is_error() {
        assert!(Cli::try_parse_from(["vault-ad-groups"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "vault-ad-groups",
            "http://127.0.0.1:8200",
            "--output",
            "/tmp/groups.csv",
            "--list-method",
            "get",
            "--delay-secs",
            "0",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.list_method, ListMethod::Get);
        assert_eq!(cli.delay_secs, 0);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, PathBuf::from("/tmp/groups.csv"));
    }

    #[test]
    fn test_token_is_not_an_argument() {
        assert!(Cli::try_parse_from(["vault-ad-groups", "https://v.example.com", "--token", "x"]).is_err());
    }
}
