//! twine-cli: payload API command-line client
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;

#[cfg(test)]
mod tests;

use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, build_ctx_from_cli};
use handlers::{health, payloads};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = build_ctx_from_cli(&cli)?;

    match cli.command {
        Commands::Payloads(cmd) => payloads::handle(&ctx, cmd.action).await?,
        Commands::Health => health::handle(&ctx).await?,
    }

    Ok(())
}
