#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::io::Read;

use serde::Serialize;

use twine_api_types::PayloadCreateRequest;

use crate::client::CliError;
use crate::print::print_json;

/// Read a `{list_1, list_2}` request from inline JSON, a file, or stdin.
///
/// Length validation happens here too so an obviously bad request never
/// reaches the server, mirroring the server's own precondition.
pub fn read_request(
    json: Option<String>,
    input: &str,
) -> Result<PayloadCreateRequest, CliError> {
    let raw = if let Some(inline) = json {
        inline
    } else if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::InputFile {
                path: "<stdin>".to_string(),
                source,
            })?;
        buf
    } else {
        fs::read_to_string(input).map_err(|source| CliError::InputFile {
            path: input.to_string(),
            source,
        })?
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::InvalidInput("empty input".to_string()));
    }

    let request: PayloadCreateRequest = serde_json::from_str(trimmed)
        .map_err(|e| CliError::InvalidInput(format!("failed to parse JSON: {e}")))?;

    if request.list_1.len() != request.list_2.len() {
        return Err(CliError::InvalidInput(format!(
            "`list_1` and `list_2` must have the same length ({} != {})",
            request.list_1.len(),
            request.list_2.len()
        )));
    }

    Ok(request)
}

pub fn write_outputs<T: Serialize>(path: &str, values: &[T]) -> Result<(), CliError> {
    if path == "-" {
        for value in values {
            print_json(value)?;
        }
        return Ok(());
    }

    let mut rendered = Vec::with_capacity(values.len());
    for value in values {
        let out = serde_json::to_string_pretty(value)
            .map_err(|e| CliError::InvalidInput(format!("failed to render output: {e}")))?;
        rendered.push(out);
    }
    let mut data = rendered.join("\n");
    data.push('\n');

    fs::write(path, data).map_err(|source| CliError::OutputFile {
        path: path.to_string(),
        source,
    })
}

pub fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value, CliError> {
    serde_json::to_value(value).map_err(|e| CliError::InvalidInput(e.to_string()))
}
