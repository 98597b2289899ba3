//! Execution service client.
//!
//! ```text
//! MetadataObject ─▶ formats (GET per measure, joined) ─▶ compile
//!                ─▶ POST executions ─▶ poll result url ─▶ ExecutionResult
//! ```
//!
//! All I/O goes through the [`Transport`] trait; [`HttpTransport`] is the
//! `reqwest` implementation.

mod error;
pub mod execute;
pub mod formats;
pub mod http;
pub mod transport;

pub use error::{ClientError, ClientResult};
pub use execute::{
    annotate_headers, execute, executions_path, ExecuteOptions, ExecutionClient,
    ExecutionRequest, ExecutionResult, ResultHeader,
};
pub use formats::{needs_original_format, with_original_format, with_original_formats};
pub use http::HttpTransport;
pub use transport::{Transport, TransportResponse, STATUS_NO_CONTENT};
