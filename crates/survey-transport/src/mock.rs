//! Scripted transport for tests.
//!
//! Responses are registered per URL; unknown URLs get the fallback response
//! (404 by default). Every request is recorded so tests can assert how many
//! requests a run issued.
//!
//! ```
//! use survey_transport::{HttpResponse, MockTransport};
//!
//! let transport = MockTransport::new()
//!     .with_json("http://test/items", r#"[{"value": 1}]"#)
//!     .with_response("http://test/broken", HttpResponse::new(500, "boom"));
//! assert_eq!(transport.request_count(), 0);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Result};
use parking_lot::Mutex;

use crate::http::{HttpRequest, HttpResponse, HttpTransport};

enum Scripted {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, Scripted>>,
    fallback: Mutex<Option<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
    count: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 for `url`.
    pub fn with_json(self, url: &str, body: &str) -> Self {
        self.with_response(url, HttpResponse::ok(body))
    }

    pub fn with_response(self, url: &str, response: HttpResponse) -> Self {
        self.set_response(url, response);
        self
    }

    /// Fail requests to `url` at the transport level.
    pub fn with_failure(self, url: &str, message: &str) -> Self {
        self.routes
            .lock()
            .insert(url.to_string(), Scripted::Fail(message.to_string()));
        self
    }

    /// Response for URLs without a route. Defaults to 404.
    pub fn with_fallback(self, response: HttpResponse) -> Self {
        *self.fallback.lock() = Some(response);
        self
    }

    /// Replace the route for `url` after construction.
    pub fn set_response(&self, url: &str, response: HttpResponse) {
        self.routes
            .lock()
            .insert(url.to_string(), Scripted::Respond(response));
    }

    pub fn request_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Requests issued for one URL.
    pub fn requests_to(&self, url: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.url == url).count()
    }

    pub fn reset_requests(&self) {
        self.requests.lock().clear();
        self.count.store(0, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.count.fetch_add(1, Ordering::SeqCst);
        let url = request.url.clone();
        self.requests.lock().push(request);

        match self.routes.lock().get(&url) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Fail(message)) => Err(anyhow!("{}", message)),
            None => Ok(self
                .fallback
                .lock()
                .clone()
                .unwrap_or_else(|| HttpResponse::new(404, format!("no route for {url}")))),
        }
    }
}
