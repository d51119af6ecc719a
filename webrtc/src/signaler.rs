//! WHIP (WebRTC-HTTP Ingestion Protocol) signaler: the single POST that
//! exchanges the SDP offer/answer, and the DELETE that tears the session
//! down.

use crate::error::{SessionError, SessionErrorKind};
use crate::http_client::HttpClient;
use logging::Logger;

pub struct WhipSignaler<'a> {
    client: &'a dyn HttpClient,
    whip_url: String,
    authorization: Option<String>,
    location: Option<String>,
    logger: Logger,
}

impl<'a> WhipSignaler<'a> {
    pub fn new(
        client: &'a dyn HttpClient,
        whip_url: impl Into<String>,
        authorization: Option<String>,
        logger: Logger,
    ) -> Self {
        WhipSignaler {
            client,
            whip_url: whip_url.into(),
            authorization,
            location: None,
            logger,
        }
    }

    /// POSTs the SDP offer and returns the answer body. Captures the
    /// `Location` header verbatim for the later DELETE.
    pub fn exchange(&mut self, offer: &str) -> Result<String, SessionError> {
        let mut headers = vec![
            ("Cache-Control".to_string(), "no-cache".to_string()),
            ("Content-Type".to_string(), "application/sdp".to_string()),
        ];
        if let Some(token) = &self.authorization {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        self.logger.info(&format!("POSTing offer to {}", self.whip_url));
        let response = self.client.post(&self.whip_url, &headers, offer)?;

        if !response.is_success() {
            return Err(SessionError::new(
                SessionErrorKind::Signaling,
                format!("WHIP endpoint returned status {}", response.status),
            ));
        }

        if !response.body.starts_with("v=") {
            return Err(SessionError::new(
                SessionErrorKind::Signaling,
                "WHIP answer body does not start with an SDP version line".to_string(),
            ));
        }

        if let Some(location) = response.header("Location") {
            self.location = Some(location.to_string());
        }

        Ok(response.body)
    }

    /// DELETEs the captured `Location` to release the session server-side.
    /// Failures are logged, never surfaced: tearing down is best-effort.
    pub fn shutdown(&self) {
        let Some(location) = &self.location else {
            self.logger.warn("no Location captured; skipping WHIP DELETE");
            return;
        };

        let mut headers = Vec::new();
        if let Some(token) = &self.authorization {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        match self.client.delete(location, &headers) {
            Ok(response) if response.is_success() => {
                self.logger.info("WHIP session deleted");
            }
            Ok(response) => {
                self.logger
                    .warn(&format!("WHIP DELETE returned status {}", response.status));
            }
            Err(e) => {
                self.logger.warn(&format!("WHIP DELETE failed: {}", e));
            }
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpResponse;
    use crate::http_client::mock::MockHttpClient;
    use logging::LogLevel;

    fn test_logger() -> Logger {
        let dir = tempfile::tempdir().unwrap();
        Logger::new(dir.path().join("test.log"), LogLevel::Debug).unwrap()
    }

    #[test]
    fn test_exchange_captures_location_and_answer() {
        let mock = MockHttpClient::new(
            HttpResponse {
                status: 201,
                headers: vec![("Location".to_string(), "/whip/session/abc".to_string())],
                body: "v=0\r\no=- 0 0 IN IP4 0.0.0.0\r\n".to_string(),
            },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );

        let mut signaler = WhipSignaler::new(
            &mock,
            "https://whip.example.com/publish",
            Some("token123".to_string()),
            test_logger(),
        );

        let answer = signaler.exchange("v=0\r\n...").unwrap();
        assert!(answer.starts_with("v=0"));
        assert_eq!(signaler.location(), Some("/whip/session/abc"));

        let posts = mock.posts.borrow();
        assert_eq!(posts[0].0, "https://whip.example.com/publish");
        assert!(posts[0]
            .1
            .iter()
            .any(|(k, v)| k == "Authorization" && v == "Bearer token123"));
    }

    #[test]
    fn test_exchange_rejects_non_2xx_status() {
        let mock = MockHttpClient::new(
            HttpResponse { status: 400, headers: vec![], body: String::new() },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );
        let mut signaler =
            WhipSignaler::new(&mock, "https://whip.example.com/publish", None, test_logger());

        assert!(signaler.exchange("offer").is_err());
    }

    #[test]
    fn test_exchange_rejects_malformed_answer_body() {
        let mock = MockHttpClient::new(
            HttpResponse { status: 201, headers: vec![], body: "not an sdp body".to_string() },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );
        let mut signaler =
            WhipSignaler::new(&mock, "https://whip.example.com/publish", None, test_logger());

        assert!(signaler.exchange("offer").is_err());
    }

    #[test]
    fn test_shutdown_deletes_captured_location() {
        let mock = MockHttpClient::new(
            HttpResponse {
                status: 201,
                headers: vec![("Location".to_string(), "/whip/session/xyz".to_string())],
                body: "v=0\r\n".to_string(),
            },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );
        let mut signaler =
            WhipSignaler::new(&mock, "https://whip.example.com/publish", None, test_logger());
        signaler.exchange("offer").unwrap();
        signaler.shutdown();

        let deletes = mock.deletes.borrow();
        assert_eq!(deletes[0].0, "/whip/session/xyz");
    }

    #[test]
    fn test_shutdown_without_location_does_not_panic() {
        let mock = MockHttpClient::new(
            HttpResponse { status: 201, headers: vec![], body: "v=0\r\n".to_string() },
            HttpResponse { status: 200, headers: vec![], body: String::new() },
        );
        let signaler =
            WhipSignaler::new(&mock, "https://whip.example.com/publish", None, test_logger());
        signaler.shutdown();
        assert!(mock.deletes.borrow().is_empty());
    }
}
