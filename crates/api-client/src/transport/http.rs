//! HTTP transport over `reqwest`

use super::Transport;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Sends each call to `<base_url>/<path>` with a JSON body
///
/// One attempt per call: no retry, and no timeout unless configured.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Build the underlying `reqwest` client from `config`
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent contains invalid header characters"))?;
        default_headers.insert(USER_AGENT, agent);

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(ApiError::Request)?;

        Ok(Self { inner, config })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, body), fields(request_id))]
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let url = self.config.url_for(path);
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let mut request = self
            .inner
            .request(method.clone(), &url)
            .header(X_REQUEST_ID, &request_id);

        if let Some(ref token) = self.config.token {
            request = request.bearer_auth(token);
        }

        if let Some(ref b) = body {
            request = request.json(b);
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!(request_id = %request_id, %method, url = %url, error = %e, "Request failed");
            ApiError::Request(e)
        })?;

        debug!(
            request_id = %request_id,
            %method,
            url = %url,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Request completed"
        );

        handle_response(response).await
    }
}

/// Map status to error and decode the JSON body
async fn handle_response(response: Response) -> ApiResult<Value> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let message = response
            .text()
            .await
            .ok()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
        Err(ApiError::api_response(status.as_u16(), message))
    }
}
