//! The narrow HTTP seam used by the Jikan client and the feed validator.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::error::TransportError;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: StatusCode, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// True for a 200 response whose content type mentions XML.
    #[must_use]
    pub fn is_xml_feed(&self) -> bool {
        self.status == StatusCode::OK
            && self
                .content_type
                .as_deref()
                .is_some_and(|ct| ct.contains("xml"))
    }
}

#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs a GET and reads the full body as text.
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;

    /// Performs a GET bounded by `timeout` without reading the body.
    async fn probe(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    #[must_use]
    pub const fn with_shared_client(client: Client) -> Self {
        Self { client }
    }
}

fn content_type(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn map_probe_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Request(err)
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content_type = content_type(&response);
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }

    async fn probe(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_probe_error(e, timeout))?;

        Ok(HttpResponse {
            status: response.status(),
            content_type: content_type(&response),
            body: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_xml_feed() {
        let ok = HttpResponse::new(StatusCode::OK, Some("application/rss+xml; charset=utf-8"), "");
        assert!(ok.is_xml_feed());

        let html = HttpResponse::new(StatusCode::OK, Some("text/html"), "");
        assert!(!html.is_xml_feed());

        let missing = HttpResponse::new(StatusCode::OK, None, "");
        assert!(!missing.is_xml_feed());

        let not_found = HttpResponse::new(StatusCode::NOT_FOUND, Some("application/xml"), "");
        assert!(!not_found.is_xml_feed());
    }
}
