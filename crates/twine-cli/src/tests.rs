#![deny(clippy::all, clippy::pedantic)]

use httpmock::MockServer;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::args::PayloadsCmd;
use crate::client::{CliError, Ctx, build_ctx_from_cli};
use crate::handlers::{health, payloads};
use crate::io::read_request;

fn ctx(server: &MockServer) -> Ctx {
    Ctx::new(&server.base_url()).expect("ctx")
}

fn tmp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("write tmp");
    file
}

#[test]
fn build_ctx_errors_without_site() {
    let cli = crate::args::Cli {
        site: None,
        command: crate::args::Commands::Health,
    };

    let err = build_ctx_from_cli(&cli).expect_err("missing site should fail");
    assert!(matches!(err, CliError::MissingSite));
}

#[test]
fn read_request_parses_inline_json() -> Result<(), CliError> {
    let request = read_request(
        Some(r#"{"list_1": ["hello"], "list_2": ["foo"]}"#.to_string()),
        "-",
    )?;
    assert_eq!(request.list_1, vec!["hello"]);
    assert_eq!(request.list_2, vec!["foo"]);
    Ok(())
}

#[test]
fn read_request_reads_from_file() -> Result<(), CliError> {
    let file = tmp_file(r#"{"list_1": [], "list_2": []}"#);
    let request = read_request(None, &file.path().display().to_string())?;
    assert!(request.list_1.is_empty());
    assert!(request.list_2.is_empty());
    Ok(())
}

#[test]
fn read_request_rejects_mismatched_lists() {
    let err = read_request(
        Some(r#"{"list_1": ["a", "b"], "list_2": ["c"]}"#.to_string()),
        "-",
    )
    .expect_err("mismatch should fail");
    assert!(matches!(err, CliError::InvalidInput(_)));
    assert!(err.to_string().contains("same length"));
}

#[test]
fn read_request_rejects_empty_input() {
    let err = read_request(Some("   ".to_string()), "-").expect_err("empty input should fail");
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[tokio::test]
async fn payloads_create_round_trips_and_writes_output() -> Result<(), CliError> {
    let server = MockServer::start();
    let id = Uuid::new_v4();

    let create_mock = server.mock(|when, then| {
        when.method("POST").path("/api/v1/payloads");
        then.status(201)
            .header("content-type", "application/json")
            .body(format!(
                r#"{{"id":"{id}","message":"Payload created successfully"}}"#
            ));
    });
    let get_mock = server.mock(|when, then| {
        when.method("GET").path(format!("/api/v1/payloads/{id}"));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"output":"HELLO, FOO"}"#);
    });

    let output = NamedTempFile::new().expect("tmp output");
    let ctx = ctx(&server);
    payloads::handle(
        &ctx,
        PayloadsCmd::Create {
            json: Some(r#"{"list_1": ["hello"], "list_2": ["foo"]}"#.to_string()),
            input: "-".to_string(),
            output: output.path().display().to_string(),
            repeat: 2,
        },
    )
    .await?;

    create_mock.assert_hits(2);
    get_mock.assert_hits(2);

    let written = std::fs::read_to_string(output.path()).expect("read output");
    assert_eq!(written.matches("HELLO, FOO").count(), 2);
    Ok(())
}

#[tokio::test]
async fn payloads_get_surfaces_error_envelope() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/payloads/nonexistent-id");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"error":{"code":"not_found","message":"payload not found"}}"#);
    });

    let ctx = ctx(&server);
    let err = payloads::handle(
        &ctx,
        PayloadsCmd::Get {
            id: "nonexistent-id".to_string(),
        },
    )
    .await
    .expect_err("missing payload should fail");

    assert!(matches!(err, CliError::Server(_)));
    assert!(err.to_string().contains("not_found"));
}

#[tokio::test]
async fn health_hits_endpoint() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/_health");
        then.status(204);
    });

    let ctx = ctx(&server);
    health::handle(&ctx).await?;
    mock.assert();
    Ok(())
}
