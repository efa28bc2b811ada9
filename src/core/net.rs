// src/core/net.rs
//! HTTP behind a two-trait seam.
//!
//! A [`Transport`] hands out a fresh [`Session`] per logical fetch. A session
//! owns one cookie jar for its lifetime, so the bootstrap request and the
//! data request that follows it share state, while two different fetches
//! never do. [`HttpTransport`] is the real implementation over
//! `reqwest::blocking`; tests plug in scripted transports.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{self, HeaderMap, HeaderValue};
use thiserror::Error;

use crate::config::consts::{ACCEPT_LANGUAGE, USER_AGENT};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("network error for {url}: {msg}")]
    Network { url: String, msg: String },
    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },
    #[error("http client setup failed: {0}")]
    Client(String),
}

/// One outbound request: target, deadline, extra headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub timeout: Duration,
    pub headers: Vec<(&'static str, String)>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self { url: url.into(), timeout, headers: Vec::new() }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx answer into `TransportError::Status`.
    pub fn error_for_status(self, url: &str) -> Result<Self, TransportError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Status { code: self.status, url: s!(url) })
        }
    }
}

/// `base?k=v&...` with the values percent-encoded.
pub fn url_with_query(base: &str, params: &[(&str, &str)]) -> Result<String, TransportError> {
    reqwest::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| TransportError::Client(format!("bad url {base}: {e}")))
}

/// A cookie-carrying conversation with one remote host.
pub trait Session {
    fn get(&mut self, req: &HttpRequest) -> Result<HttpResponse, TransportError>;

    /// POST an `application/x-www-form-urlencoded` body, fields in order.
    fn post_form(
        &mut self,
        req: &HttpRequest,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}

/// Factory for sessions. Shared across worker threads, hence `Sync`.
pub trait Transport: Sync {
    type Session: Session;

    fn open(&self) -> Result<Self::Session, TransportError>;
}

/// reqwest-backed transport. Each `open()` builds a new client with its
/// own cookie store.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    user_agent: String,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self { user_agent: s!(USER_AGENT) }
    }
}

impl HttpTransport {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self { user_agent: user_agent.into() }
    }
}

pub struct HttpSession {
    client: Client,
}

impl Transport for HttpTransport {
    type Session = HttpSession;

    fn open(&self) -> Result<HttpSession, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));

        let client = Client::builder()
            .cookie_store(true)
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(HttpSession { client })
    }
}

impl Session for HttpSession {
    fn get(&mut self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = self.client.get(&req.url).timeout(req.timeout);
        send(with_headers(builder, req), &req.url)
    }

    fn post_form(
        &mut self,
        req: &HttpRequest,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let builder = self.client.post(&req.url).timeout(req.timeout).form(form);
        send(with_headers(builder, req), &req.url)
    }
}

fn with_headers(mut builder: RequestBuilder, req: &HttpRequest) -> RequestBuilder {
    for (name, value) in &req.headers {
        builder = builder.header(*name, value.as_str());
    }
    builder
}

fn send(builder: RequestBuilder, url: &str) -> Result<HttpResponse, TransportError> {
    let resp = builder.send().map_err(|e| classify(e, url))?;
    let status = resp.status().as_u16();
    let body = resp.text().map_err(|e| classify(e, url))?;
    Ok(HttpResponse { status, body })
}

fn classify(e: reqwest::Error, url: &str) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout { url: s!(url) }
    } else {
        TransportError::Network { url: s!(url), msg: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_2xx_is_a_status_error() {
        let resp = HttpResponse { status: 503, body: s!("busy") };
        let err = resp.error_for_status("http://x/api").unwrap_err();
        assert_eq!(err, TransportError::Status { code: 503, url: s!("http://x/api") });
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::new("http://x/", Duration::from_secs(1))
            .header("Referer", "http://x/page");
        assert_eq!(req.header_value("referer"), Some("http://x/page"));
        assert_eq!(req.header_value("accept"), None);
    }

    #[test]
    fn query_values_are_encoded() {
        let url = url_with_query("https://x.test/api", &[("symbol", "M&M")]).unwrap();
        assert_eq!(url, "https://x.test/api?symbol=M%26M");
        assert!(matches!(url_with_query("not a url", &[]), Err(TransportError::Client(_))));
    }

    #[test]
    fn http_transport_opens_sessions() {
        assert!(HttpTransport::default().open().is_ok());
    }
}
