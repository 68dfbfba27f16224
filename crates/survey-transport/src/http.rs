//! Request/response types, the transport trait and the `ureq` implementation.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

use survey_types::env_utils::env_var_or;

/// Content type sent with choice requests unless configured otherwise.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A body-less GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed request. Non-2xx statuses are
/// responses too; only transport-level failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: canonical_reason(status).to_string(),
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// 2xx.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status as shown in error messages, e.g. `404 Not Found`.
    pub fn status_line(&self) -> String {
        if self.status_text.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.status_text)
        }
    }
}

fn canonical_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

/// Issues a single GET. No retries.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking `ureq` agent driven from a tokio blocking thread.
#[derive(Clone, Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Default request timeout in seconds (can be overridden by env).
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Timeouts from `SURVEY_HTTP_TIMEOUT_SECS` / `SURVEY_HTTP_CONNECT_TIMEOUT_SECS`.
    pub fn new() -> Self {
        let timeout = env_var_or("SURVEY_HTTP_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS);
        let connect =
            env_var_or("SURVEY_HTTP_CONNECT_TIMEOUT_SECS", Self::DEFAULT_CONNECT_TIMEOUT_SECS);
        Self::with_timeouts(Duration::from_secs(timeout), Duration::from_secs(connect))
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .timeout_connect(connect_timeout)
                .build(),
        }
    }

    fn get_blocking(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse> {
        let mut call = agent.get(&request.url);
        for (name, value) in &request.headers {
            call = call.set(name, value);
        }
        let response = match call.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return Err(anyhow!("request to {} failed: {}", request.url, transport));
            }
        };
        let status = response.status();
        let status_text = response.status_text().to_string();
        let body = response
            .into_string()
            .with_context(|| format!("failed to read response body from {}", request.url))?;
        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HttpTransport for UreqTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, "GET");
        let agent = self.agent.clone();
        let response = tokio::task::spawn_blocking(move || Self::get_blocking(&agent, &request))
            .await
            .map_err(|e| anyhow!("HTTP worker task failed: {}", e))??;
        if !response.is_ok() {
            warn!(status = response.status, "request returned non-success status");
        }
        Ok(response)
    }
}
