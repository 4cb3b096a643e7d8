//! Set up `@qodestack/biome-config` in a JavaScript project.

use std::process::ExitCode;

use color_eyre::{Result, Section};
use tracing::{instrument, level_filters::LevelFilter};

mod cmd;

use clap::Parser;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Write a Biome config, VS Code settings, and package scripts for
/// @qodestack/biome-config.
#[derive(Parser)]
#[command(author, version = env!("BIOME_SETUP_VERSION"), about)]
struct Cli {
    #[command(flatten)]
    config: cmd::setup::Config,
}

#[instrument]
fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // User-facing output goes to stdout; logs go to stderr and stay quiet
    // unless requested with `BIOME_SETUP_LOG` directives.
    //
    // Examples:
    // - `BIOME_SETUP_LOG=debug` to see every decision the setup makes
    // - `BIOME_SETUP_LOG=warn` to see recovered problems, like a malformed
    //   settings file
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .pretty(),
        )
        .with(
            EnvFilter::builder()
                .with_env_var("BIOME_SETUP_LOG")
                .with_default_directive(LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .init();

    cmd::setup::main(cli.config)
        .suggestion("Run `biome-setup --help` to see the available flags.")
}
