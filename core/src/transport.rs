//! HTTP transport seam between the executor and the network.
//!
//! # Design
//! [`Transport::send`] performs exactly one attempt; the executor drives
//! retries above this seam. The production [`UreqTransport`] builds a fresh
//! agent per call so concurrent callers never share connection state, and it
//! reads response bodies to completion on every path — nothing upstream has
//! to remember to drain a stream.

use std::fmt;
use std::sync::Arc;

use crate::http::{HttpRequest, HttpResponse, Method};

/// Network-level failure from a single attempt.
#[derive(Debug, Clone)]
pub struct TransportError {
    pub message: String,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Executes one HTTP attempt.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// ureq-backed transport.
///
/// Non-2xx statuses come back as data, not errors, so the retry policy and
/// the resource layer see every status code.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

fn apply_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        let result = match request.method {
            Method::Get | Method::Delete => {
                let builder = match request.method {
                    Method::Get => agent.get(&request.url),
                    _ => agent.delete(&request.url),
                };
                apply_headers(builder, &request.headers).call()
            }
            Method::Post | Method::Put | Method::Patch => {
                let builder = match request.method {
                    Method::Post => agent.post(&request.url),
                    Method::Put => agent.put(&request.url),
                    _ => agent.patch(&request.url),
                };
                let builder = apply_headers(builder, &request.headers);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError {
                message: e.to_string(),
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
