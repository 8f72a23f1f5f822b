// Entrypoint for the CLI application.
// - Loads `.env`, parses arguments and sets up logging on stderr.
// - Builds the config and client once, runs one command, exits.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use notion_automation::api::ApiClient;
use notion_automation::cli::{self, Cli};
use notion_automation::config::Config;

fn main() -> Result<()> {
    // A missing .env file is fine; the variables may come from the shell.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    init_logging(args.verbose);

    let config = Config::from_env();
    tracing::debug!(?config, "loaded configuration");

    let api = ApiClient::new(&config)?;
    cli::run(&args, &api)
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
