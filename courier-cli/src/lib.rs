//! Command-line interface for the courier delivery-cost engine.
//!
//! `courier quote <order.json>` reads an order, optionally a topology file,
//! runs the exhaustive optimiser and prints the quote as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod quote;

pub use error::CliError;

use quote::{QuoteArgs, run_quote};

const ARG_ORDER: &str = "order";
const ARG_TOPOLOGY: &str = "topology";
const ARG_EMPTY_LEG_POLICY: &str = "empty-leg-policy";
const ARG_STRATEGY: &str = "strategy";
const ENV_ORDER: &str = "COURIER_CMDS_QUOTE_ORDER_PATH";

/// Run the courier CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or input files are
/// invalid, or when the quote cannot be written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Quote(args) => run_quote(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Quote the cheapest delivery route for an order",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quote an order against the delivery network.
    Quote(QuoteArgs),
}

#[cfg(test)]
mod tests;
