//! Canned-response transport shared by unit and behavior tests.
//!
//! Included from both sides; the including module brings `HttpClient`,
//! `HttpError`, `HttpRequest` and `HttpResponse` into scope.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Serves canned responses by exact URL and records every request.
///
/// Unrouted URLs answer 404.
#[derive(Debug, Default)]
pub struct StubHttpClient {
    routes: HashMap<String, Result<HttpResponse, HttpError>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubHttpClient {
    pub fn route(
        mut self,
        url: impl Into<String>,
        response: Result<HttpResponse, HttpError>,
    ) -> Self {
        self.routes.insert(url.into(), response);
        self
    }

    pub fn ok(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.route(url, Ok(HttpResponse::ok(body)))
    }

    pub fn fail(self, url: impl Into<String>, message: &str) -> Self {
        self.route(url, Err(HttpError::new(message)))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.url)
            .collect()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.requested_urls()
            .iter()
            .filter(|url| url.starts_with(prefix))
            .count()
    }
}

impl HttpClient for StubHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "")));
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}
