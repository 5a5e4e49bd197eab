//! `shelf`: browse a directory of Markdown tutorials in the browser.
//!
//! ```text
//! shelf serve [--root DIR] [--port N]   start the web server
//! shelf list [--json]                   print tutorials in reading order
//! ```

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ListArgs, ServeArgs};
use error::CliError;
use output::Output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Self-hosted Markdown tutorial browser.
#[derive(Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the tutorial server.
    Serve(ServeArgs),
    /// Print tutorials in reading order.
    List(ListArgs),
}

impl Cli {
    fn verbose(&self) -> bool {
        match &self.command {
            Commands::Serve(args) => args.verbose,
            Commands::List(_) => false,
        }
    }

    fn run(self) -> Result<(), CliError> {
        match self.command {
            Commands::Serve(args) => tokio::runtime::Runtime::new()?.block_on(args.execute(VERSION)),
            Commands::List(args) => args.execute(),
        }
    }
}

/// Log to stderr. `--verbose` forces `info`; otherwise `RUST_LOG` decides.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose());

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Output::new().error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_parse() {
        let cli = Cli::try_parse_from(["shelf", "serve", "--root", "docs", "--port", "9000", "-v"])
            .unwrap();
        assert!(cli.verbose());
    }

    #[test]
    fn test_cache_flags_conflict() {
        assert!(Cli::try_parse_from(["shelf", "serve", "--cache", "true", "--no-cache"]).is_err());
    }

    #[test]
    fn test_list_is_never_verbose() {
        let cli = Cli::try_parse_from(["shelf", "list", "--json"]).unwrap();
        assert!(!cli.verbose());
    }
}
