//! Request execution behind the REST client
//!
//! [`ApiService`](crate::service::ApiService) speaks JSON values to a
//! [`Transport`]; the transport decides where requests go.
//!
//! | Transport | Backend |
//! |-----------|---------|
//! | [`HttpTransport`] | Remote REST server over `reqwest` |
//! | [`MemoryTransport`] | In-process collections (tests, offline mode) |

mod http;
mod memory;

pub use http::HttpTransport;
pub use memory::MemoryTransport;

use crate::error::ApiResult;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// Executes one REST call
///
/// `path` is relative to the backend root (`entities`, `entities/7`).
/// Non-2xx outcomes are returned as errors; an empty success body is
/// returned as [`Value::Null`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and return the decoded JSON body
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value>;
}
