//! `shelf serve`: run the web server.

use clap::Args;
use shelf_config::{CliSettings, Config};
use shelf_server::{run_server, server_config_from_shelf_config};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Log requests and render warnings.
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Cache the tutorial tree and watch for changes (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Rescan the tutorial tree on every request.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Load configuration, print where everything comes from, then serve
    /// until interrupted.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let overrides = CliSettings {
            host: self.host,
            port: self.port,
            root: None,
            cache_enabled: if self.no_cache { Some(false) } else { self.cache },
        };
        let config = self.config.load(overrides)?;

        print_summary(&Output::new(), &config);

        let server_config = server_config_from_shelf_config(&config, version.to_owned(), self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }
}

fn print_summary(output: &Output, config: &Config) {
    output.highlight(&format!(
        "{} on http://{}:{}",
        config.site.title, config.server.host, config.server.port
    ));
    output.info(&format!("  tutorials:   {}", config.tutorials.root.display()));
    if let Some(source) = &config.source {
        output.info(&format!("  config:      {}", source.display()));
    }
    output.info(if config.tutorials.cache_enabled {
        "  tree cache:  on, watching for changes"
    } else {
        "  tree cache:  off, rescanning per request"
    });
    match &config.preferences.file {
        Some(file) => output.info(&format!("  preferences: {}", file.display())),
        None => output.info("  preferences: in memory"),
    }
}
