use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Transport double that records requests and answers by URL.
#[derive(Debug, Default)]
pub(crate) struct RecordingHttpClient {
    fallback: Option<Result<HttpResponse, HttpError>>,
    routes: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    /// Answers every request with `response`.
    pub(crate) fn respond(response: HttpResponse) -> Self {
        Self {
            fallback: Some(Ok(response)),
            ..Self::default()
        }
    }

    pub(crate) fn failure(message: &str) -> Self {
        Self {
            fallback: Some(Err(HttpError::new(message))),
            ..Self::default()
        }
    }

    /// Answers requests for `url` with `response`; unknown URLs get a 404.
    pub(crate) fn route(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.routes.insert(url.into(), response);
        self
    }

    pub(crate) fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub(crate) fn recorded_urls(&self) -> Vec<String> {
        self.recorded_requests()
            .into_iter()
            .map(|request| request.url)
            .collect()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = match self.routes.get(&request.url) {
            Some(response) => Ok(response.clone()),
            None => self
                .fallback
                .clone()
                .unwrap_or_else(|| Ok(HttpResponse::with_status(404, ""))),
        };
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

/// JSON body for a data endpoint response.
pub(crate) fn table_body(columns: &[&str], rows: &[&[&str]]) -> String {
    serde_json::json!({ "Title": columns, "Data": rows }).to_string()
}
