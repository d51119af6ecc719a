//! HTTP client abstraction for the WHIP signaler.
//!
//! Kept as a trait so the signaling exchange can be driven by a
//! deterministic mock in tests instead of a real network round trip.

use crate::error::{SessionError, SessionErrorKind};

/// Response from a POST/DELETE exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal blocking HTTP surface the WHIP signaler needs.
pub trait HttpClient {
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, SessionError>;

    fn delete(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, SessionError>;
}

/// Production `HttpClient` backed by `ureq`.
pub struct UreqHttpClient;

impl UreqHttpClient {
    pub fn new() -> Self {
        UreqHttpClient
    }
}

impl Default for UreqHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqHttpClient {
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, SessionError> {
        let mut request = ureq::post(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        match request.send_string(body) {
            Ok(response) => Ok(to_http_response(response)),
            Err(ureq::Error::Status(_, response)) => Ok(to_http_response(response)),
            Err(e) => Err(SessionError::new(SessionErrorKind::Signaling, e.to_string())),
        }
    }

    fn delete(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, SessionError> {
        let mut request = ureq::delete(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        match request.call() {
            Ok(response) => Ok(to_http_response(response)),
            Err(ureq::Error::Status(_, response)) => Ok(to_http_response(response)),
            Err(e) => Err(SessionError::new(SessionErrorKind::Signaling, e.to_string())),
        }
    }
}

fn to_http_response(response: ureq::Response) -> HttpResponse {
    let status = response.status();
    let headers = response
        .headers_names()
        .into_iter()
        .filter_map(|name| {
            response
                .header(&name)
                .map(|value| (name.clone(), value.to_string()))
        })
        .collect();
    let body = response.into_string().unwrap_or_default();

    HttpResponse { status, headers, body }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;

    /// Deterministic `HttpClient` for tests: returns one canned response per
    /// call and records the requests it received.
    pub struct MockHttpClient {
        pub post_response: HttpResponse,
        pub delete_response: HttpResponse,
        pub posts: RefCell<Vec<(String, Vec<(String, String)>, String)>>,
        pub deletes: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl MockHttpClient {
        pub fn new(post_response: HttpResponse, delete_response: HttpResponse) -> Self {
            MockHttpClient {
                post_response,
                delete_response,
                posts: RefCell::new(Vec::new()),
                deletes: RefCell::new(Vec::new()),
            }
        }
    }

    impl HttpClient for MockHttpClient {
        fn post(
            &self,
            url: &str,
            headers: &[(String, String)],
            body: &str,
        ) -> Result<HttpResponse, SessionError> {
            self.posts
                .borrow_mut()
                .push((url.to_string(), headers.to_vec(), body.to_string()));
            Ok(self.post_response.clone())
        }

        fn delete(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<HttpResponse, SessionError> {
            self.deletes
                .borrow_mut()
                .push((url.to_string(), headers.to_vec()));
            Ok(self.delete_response.clone())
        }
    }
}
