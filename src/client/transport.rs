//! Transport seam between the client and the execution service.

use async_trait::async_trait;
use serde_json::Value;

use super::error::{ClientError, ClientResult};

/// Status of an execution whose result holds no rows.
pub const STATUS_NO_CONTENT: u16 = 204;

/// A response as seen by the client: status plus the parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// `None` for empty bodies (e.g. `204 No Content`).
    pub body: Option<Value>,
}

impl TransportResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, Some(body))
    }

    pub fn no_content() -> Self {
        Self::new(STATUS_NO_CONTENT, None)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_no_content(&self) -> bool {
        self.status == STATUS_NO_CONTENT
    }

    /// Fail on non-success statuses.
    pub fn error_for_status(self, path: &str) -> ClientResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Status {
                status: self.status,
                path: path.to_string(),
            })
        }
    }

    /// The body of a successful response.
    pub fn into_json(self, path: &str) -> ClientResult<Value> {
        self.error_for_status(path)?
            .body
            .ok_or_else(|| ClientError::missing(path, "body"))
    }
}

/// Requests the client needs from the execution service.
///
/// Implementations return every response, whatever its status; status
/// interpretation belongs to the caller. `poll_resource` owns any waiting
/// for a result that is still being computed.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to a path of the service.
    async fn post_json(&self, path: &str, body: &Value) -> ClientResult<TransportResponse>;

    /// GET a path of the service.
    async fn get_json(&self, path: &str) -> ClientResult<TransportResponse>;

    /// Read a result resource until it is ready.
    async fn poll_resource(&self, url: &str) -> ClientResult<TransportResponse>;
}
