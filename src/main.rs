// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, parse arguments, hand off to `cli`.
// - Logs go to stderr so tables and JSON on stdout stay clean.

use clap::Parser;
use music_finder::cli::{run_command, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // RUST_LOG wins over -v when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("music_finder={default_level}")));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    run_command(&cli)
}
