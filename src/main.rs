//! Conceptforge - command-line tool for generating fantasy concept art

use std::process::ExitCode;

use clap::Parser;
use conceptforge::cli::{self, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "conceptforge=debug" } else { "conceptforge=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli::run(cli)
}
