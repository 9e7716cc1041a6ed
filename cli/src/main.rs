#![deny(missing_docs)]

//! # AsyncDoc CLI
//!
//! Command Line Interface around the AsyncAPI resolution engine.
//!
//! Supported Commands:
//! - `resolve`: Fetch a raw document and print the resolved, display-ready JSON.
//! - `publish`: Send a channel operation's example message through the documented service.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod fetch;
mod publish;
mod resolve;

#[derive(Parser, Debug)]
#[clap(author, version, about = "AsyncAPI documentation resolver")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve an AsyncAPI document into its display model.
    Resolve(resolve::ResolveArgs),
    /// Publish an example message for a channel operation.
    Publish(publish::PublishArgs),
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Resolve(args) => resolve::execute(args)?,
        Commands::Publish(args) => publish::execute(args)?,
    }

    Ok(())
}
