//! Command-line surface for `twine-cli`.

#![deny(clippy::all, clippy::pedantic)]

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "twine-cli", version, about = "Twine payload API CLI", long_about = None)]
pub struct Cli {
    /// API base URL, e.g. <http://127.0.0.1:8000>
    #[arg(long, env = "TWINE_SITE_URL")]
    pub site: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Payload management (create/fetch)
    Payloads(PayloadsArgs),
    /// Service health probe
    Health,
}

#[derive(Parser, Debug)]
pub struct PayloadsArgs {
    #[command(subcommand)]
    pub action: PayloadsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PayloadsCmd {
    /// Create a payload from two equal-length string lists, then fetch and
    /// print its derived output
    Create {
        /// Inline JSON object with `list_1` and `list_2`
        #[arg(long, short = 'j')]
        json: Option<String>,

        /// Input file path, `-` for stdin (ignored when --json is given)
        #[arg(long, short = 'i', default_value = "-")]
        input: String,

        /// Output file path, `-` for stdout
        #[arg(long, short = 'o', default_value = "-")]
        output: String,

        /// Number of create/fetch iterations
        #[arg(
            long,
            short = 'r',
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        repeat: u32,
    },
    /// Fetch a payload by id
    Get { id: String },
}
