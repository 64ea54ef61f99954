#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;

use crate::client::{CliError, Ctx};

pub async fn handle(ctx: &Ctx) -> Result<(), CliError> {
    ctx.request_no_body(Method::GET, "_health").await?;
    eprintln!("service healthy");
    Ok(())
}
