#![deny(clippy::all, clippy::pedantic)]

use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use twine_api_types::ApiErrorBody;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required (use --site or TWINE_SITE_URL)")]
    MissingSite,
    #[error("failed to read input {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write output {path}: {source}")]
    OutputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Server(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Clone, Debug)]
pub struct Ctx {
    pub client: Client,
    pub base: Url,
}

impl Ctx {
    pub fn new(site: &str) -> Result<Self, CliError> {
        let base = Url::parse(site)?.join("/")?;
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("twine-cli/", env!("CARGO_PKG_VERSION"))
    }

    pub fn url(&self, path: &str) -> Result<Url, CliError> {
        self.base.join(path).map_err(CliError::Url)
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, CliError> {
        let url = self.url(path)?;

        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await?;
        Self::handle(resp).await
    }

    pub async fn request_no_body(&self, method: Method, path: &str) -> Result<(), CliError> {
        let url = self.url(path)?;

        let resp = self.client.request(method, url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CliError::Server(format!("status {status} body {text}")));
        }
        Ok(())
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, CliError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            // Prefer the structured envelope when the server sent one.
            if let Ok(body) = serde_json::from_slice::<ApiErrorBody>(&bytes) {
                return Err(CliError::Server(format!(
                    "{}: {}",
                    body.error.code, body.error.message
                )));
            }
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(CliError::Server(format!("status {status} body {text}")));
        }
        let val = serde_json::from_slice(&bytes)
            .map_err(|e| CliError::Server(format!("failed to parse body: {e}")))?;
        Ok(val)
    }
}

pub fn build_ctx_from_cli(cli: &Cli) -> Result<Ctx, CliError> {
    let site = cli.site.clone().ok_or(CliError::MissingSite)?;
    Ctx::new(&site)
}
