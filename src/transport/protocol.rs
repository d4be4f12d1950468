//! Transport protocol abstraction trait.
//!
//! This module defines the `HttpTransport` trait that abstracts the HTTP client
//! used to reach the server, together with the plain request and response
//! types exchanged through it. The driver only ever needs one request in
//! flight per call site and a fully buffered response body.

use crate::error::TransportError;
use async_trait::async_trait;
use std::fmt;

/// HTTP methods used by the transactional endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Open, execute and commit
    Post,
    /// Roll back
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute target URL
    pub url: String,
    /// JSON body, if any
    pub body: Option<String>,
}

impl HttpRequest {
    /// Create a POST request with a JSON body.
    pub fn post(url: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    /// Create a DELETE request without a body.
    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            body: None,
        }
    }
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Value of the `Location` header, if present
    pub location: Option<String>,
    /// Complete response body
    pub body: String,
}

impl HttpResponse {
    /// Create a response with the given status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            location: None,
            body: body.into(),
        }
    }

    /// Attach a `Location` header.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait for database communication.
///
/// Implementations must be safe to share between every session and
/// transaction of a driver, and must read the response body to the end
/// before returning, on success and on failure.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and wait for the complete response.
    ///
    /// Request headers (`Content-Type`, `Accept`, keep-alive and any
    /// authorization) are the transport's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request cannot be sent or the body
    /// cannot be read.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request() {
        let request = HttpRequest::post("http://h/db/data/transaction", "{}".to_string());
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_delete_request_has_no_body() {
        let request = HttpRequest::delete("http://h/db/data/transaction/1");
        assert_eq!(request.method, Method::Delete);
        assert!(request.body.is_none());
        assert_eq!(request.method.to_string(), "DELETE");
    }

    #[test]
    fn test_response_status() {
        assert!(HttpResponse::new(201, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());

        let response = HttpResponse::new(201, "{}").with_location("http://h/tx/1");
        assert_eq!(response.location.as_deref(), Some("http://h/tx/1"));
    }
}
