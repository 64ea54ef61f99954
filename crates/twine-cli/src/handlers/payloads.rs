#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;

use twine_api_types::{PayloadCreateResponse, PayloadOutput};

use crate::args::PayloadsCmd;
use crate::client::{CliError, Ctx};
use crate::io::{read_request, to_value, write_outputs};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: PayloadsCmd) -> Result<(), CliError> {
    match cmd {
        PayloadsCmd::Create {
            json,
            input,
            output,
            repeat,
        } => create(ctx, json, &input, &output, repeat).await,
        PayloadsCmd::Get { id } => get(ctx, &id).await,
    }
}

async fn create(
    ctx: &Ctx,
    json: Option<String>,
    input: &str,
    output: &str,
    repeat: u32,
) -> Result<(), CliError> {
    let request = read_request(json, input)?;
    let body = to_value(&request)?;

    let mut outputs = Vec::with_capacity(repeat as usize);
    for iteration in 1..=repeat {
        if repeat > 1 {
            eprintln!("--- iteration {iteration}/{repeat} ---");
        }

        let created: PayloadCreateResponse = ctx
            .request(Method::POST, "api/v1/payloads", Some(body.clone()))
            .await?;
        let fetched: PayloadOutput = ctx
            .request(Method::GET, &format!("api/v1/payloads/{}", created.id), None)
            .await?;
        outputs.push(fetched);
    }

    write_outputs(output, &outputs)
}

async fn get(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    let fetched: PayloadOutput = ctx
        .request(Method::GET, &format!("api/v1/payloads/{id}"), None)
        .await?;
    print_json(&fetched)
}
