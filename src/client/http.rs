//! HTTP implementation of [`Transport`] over `reqwest`.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::error::{ClientError, ClientResult};
use super::transport::{Transport, TransportResponse};
use crate::config::{PollSettings, Settings};

/// Talks to the execution service over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    poll: PollSettings,
}

impl HttpTransport {
    /// Build a transport for `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: std::time::Duration, poll: PollSettings) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poll,
        })
    }

    /// Build a transport from the `[server]` and `[poll]` settings.
    pub fn from_settings(settings: &Settings) -> ClientResult<Self> {
        let base_url = settings.server.resolved_base_url()?;
        Self::new(base_url, settings.server.timeout(), settings.poll.clone())
    }

    /// Absolute url of a service path; absolute urls pass through.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    async fn read(response: Response) -> ClientResult<TransportResponse> {
        let status = response.status();
        let bytes = response.bytes().await?;
        response_from_parts(status, &bytes)
    }
}

/// Build a [`TransportResponse`] from a status and a raw body.
///
/// Error bodies are often HTML or plain text; they are dropped so the caller
/// still sees the failing status.
fn response_from_parts(status: StatusCode, bytes: &[u8]) -> ClientResult<TransportResponse> {
    let body = if status == StatusCode::NO_CONTENT || bytes.is_empty() {
        None
    } else if status.is_success() {
        Some(serde_json::from_slice(bytes)?)
    } else {
        serde_json::from_slice(bytes).ok()
    };

    Ok(TransportResponse::new(status.as_u16(), body))
}


#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: &Value) -> ClientResult<TransportResponse> {
        debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn get_json(&self, path: &str) -> ClientResult<TransportResponse> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        Self::read(response).await
    }

    async fn poll_resource(&self, url: &str) -> ClientResult<TransportResponse> {
        for attempt in 1..=self.poll.max_attempts {
            let response = self
                .client
                .get(self.url(url))
                .header(ACCEPT, "application/json")
                .send()
                .await?;

            if response.status() != StatusCode::ACCEPTED {
                return Self::read(response).await;
            }

            debug!(url, attempt, "result not ready");
            tokio::time::sleep(self.poll.interval()).await;
        }

        Err(ClientError::PollExhausted {
            url: url.to_string(),
            attempts: self.poll.max_attempts,
        })
    }
}
