//! ne-archive main entry point
//!
//! Command-line interface for archiving an author's Nintendo Enthusiast
//! posts into the Wayback Machine.

use anyhow::Context;
use clap::Parser;
use ne_archive::archive::Archiver;
use ne_archive::config::{load_config, Config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Archive all of an author's posts to the Wayback Machine
#[derive(Parser, Debug)]
#[command(name = "ne-archive")]
#[command(version = "1.0.0")]
#[command(about = "Archive an author's posts to the Wayback Machine", long_about = None)]
struct Cli {
    /// The author's name as seen in the author URL (for
    /// 'nintendoenthusiast.com/author/omar-t/', the author is 'omar-t')
    #[arg(long)]
    author: String,

    /// Turn on debug logs
    #[arg(long)]
    debug: bool,

    /// The default backoff time maximum may not be sufficient. Use this to
    /// override; value is in minutes
    #[arg(long, value_name = "MINUTES", default_value_t = 0.0)]
    max_backoff_override: f64,

    /// Optional TOML profile overriding the built-in site defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let archiver = match build_archiver(&cli) {
        Ok(archiver) => archiver,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    let result = archiver.run(&cli.author).await;
    ExitCode::from(result.outcome.exit_code())
}

/// Loads configuration, applies CLI overrides, and builds the archiver
fn build_archiver(cli: &Cli) -> anyhow::Result<Archiver> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if cli.max_backoff_override > 0.0 {
        config.backoff.raise_max_wait(cli.max_backoff_override);
    }

    Archiver::new(config).context("failed to initialize HTTP clients")
}

/// Sets up the tracing subscriber on stderr; DEBUG level with --debug,
/// INFO otherwise
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("ne_archive=debug,info")
    } else {
        EnvFilter::new("ne_archive=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
