//! HTTP transport implementation backed by `reqwest`.
//!
//! One `ReqwestTransport` is created per driver and shared by every session
//! and transaction created from it, so its idle connection pool is reused
//! across transactions.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, CONTENT_TYPE, LOCATION};
use tracing::debug;

use crate::connection::{ConnectionParams, Credentials};
use crate::error::{ConnectionError, TransportError};

use super::protocol::{HttpRequest, HttpResponse, HttpTransport, Method};

/// HTTP transport implementation.
pub struct ReqwestTransport {
    /// Pooled HTTP client
    client: reqwest::Client,
    /// Basic auth credentials sent with every request
    credentials: Option<Credentials>,
}

impl ReqwestTransport {
    /// Build a transport from connection parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::ClientBuildFailed` if the underlying client
    /// cannot be constructed.
    pub fn new(params: &ConnectionParams) -> Result<Self, ConnectionError> {
        let mut builder = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .pool_max_idle_per_host(params.pool_max_idle_per_host)
            .user_agent(params.user_agent.clone());

        if let Some(timeout) = params.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = params.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ConnectionError::ClientBuildFailed(e.to_string()))?;

        Ok(Self {
            client,
            credentials: params.credentials.clone(),
        })
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = match request.method {
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(credentials) = &self.credentials {
            builder = builder.basic_auth(credentials.username(), Some(credentials.password()));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed {
                url: request.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let location = location_header(response.headers());

        // Reading to the end hands the connection back to the pool
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::BodyReadFailed(e.to_string()))?;
        let location = location?;

        debug!(status, has_location = location.is_some(), "received response");

        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }
}

/// Read the `Location` header, rejecting values that are not valid text.
fn location_header(headers: &HeaderMap) -> Result<Option<String>, TransportError> {
    headers
        .get(LOCATION)
        .map(|value| {
            value.to_str().map(str::to_string).map_err(|_| {
                let raw = String::from_utf8_lossy(value.as_bytes()).into_owned();
                TransportError::InvalidLocation(raw)
            })
        })
        .transpose()
}
