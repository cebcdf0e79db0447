//! Control-plane client and the generic request executor.
//!
//! # Design
//! Every resource method in this crate funnels through [`execute`]: one
//! routine owns URL composition, body encoding, query encoding, credential
//! injection, and the retry loop. `ConfluentClient` is an immutable
//! configuration value — builder calls return a new value, nothing mutates
//! in place, and clones share the authenticator and transport through `Arc`
//! so concurrent calls are safe.

use std::sync::Arc;
use std::thread;

use serde::Serialize;
use url::Url;

use crate::auth::{Authenticator, NoAuth};
use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse, Method};
use crate::query::{encode_query, QueryParams};
use crate::retry::RetryPolicy;
use crate::transport::{Transport, UreqTransport};

/// Production control-plane endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.confluent.cloud";

/// Marker for calls that carry no request body.
pub(crate) const NO_BODY: Option<&()> = None;

/// Client for the Confluent Cloud control plane.
///
/// Construct once and reuse; cloning is cheap and clones may be used from
/// many threads at once, since every attempt builds its own transport
/// connection and no per-call state is written.
#[derive(Clone)]
pub struct ConfluentClient {
    base_url: String,
    auth: Arc<dyn Authenticator>,
    retry: RetryPolicy,
    transport: Arc<dyn Transport>,
}

impl ConfluentClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth: Arc::new(NoAuth),
            retry: RetryPolicy::default(),
            transport: Arc::new(UreqTransport),
        }
    }

    /// Replace the credentials applied to every request.
    pub fn with_auth(mut self, auth: impl Authenticator + 'static) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    /// Point the client at a different control plane (staging, mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Substitute the HTTP transport. Intended for test doubles.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one request through the shared executor against this client's
    /// base URL.
    pub(crate) fn execute<B: Serialize>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
        params: Option<&dyn QueryParams>,
    ) -> Result<HttpResponse, Error> {
        execute(
            &self.base_url,
            self.auth.as_ref(),
            &self.retry,
            self.transport.as_ref(),
            path,
            method,
            body,
            params,
        )
    }
}

impl Default for ConfluentClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The generic request pipeline shared by the control-plane and cluster
/// clients.
///
/// Joins `path` onto the base URL's path (append with slash normalization —
/// a non-root base keeps its prefix), serializes `body` to JSON, overwrites
/// the query string from `params`, applies credentials, then drives the
/// transport under `retry`. Attempts are strictly serial. The returned
/// response's status code is the caller's to interpret; only the retry
/// predicate looks at it here.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute<B: Serialize>(
    base_url: &str,
    auth: &dyn Authenticator,
    retry: &RetryPolicy,
    transport: &dyn Transport,
    path: &str,
    method: Method,
    body: Option<&B>,
    params: Option<&dyn QueryParams>,
) -> Result<HttpResponse, Error> {
    let mut url =
        Url::parse(base_url).map_err(|e| Error::UrlParse(format!("{base_url}: {e}")))?;

    let joined = join_path(url.path(), path);
    url.set_path(&joined);

    // The query is always rebuilt from `params`, never merged with whatever
    // the base URL carried.
    match params {
        Some(params) => {
            let query = encode_query(params);
            url.set_query(if query.is_empty() { None } else { Some(&query) });
        }
        None => url.set_query(None),
    }

    let mut headers = Vec::new();
    let body = match body {
        Some(value) => {
            headers.push(("content-type".to_string(), "application/json".to_string()));
            Some(serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))?)
        }
        None => None,
    };

    let mut request = HttpRequest {
        method,
        url: url.to_string(),
        headers,
        body,
    };
    auth.apply(&mut request)?;

    let mut attempt = 0;
    loop {
        attempt += 1;
        match transport.send(&request) {
            Ok(response) => {
                if attempt >= retry.max_attempts
                    || !retry.should_retry(Some(response.status), false)
                {
                    return Ok(response);
                }
            }
            Err(err) => {
                if attempt >= retry.max_attempts {
                    return Err(Error::Transport {
                        message: err.to_string(),
                        attempts: attempt,
                    });
                }
            }
        }
        thread::sleep(retry.backoff(attempt));
    }
}

/// Append `path` to the base path, normalizing slashes.
fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        }
    } else {
        format!("{base}/{path}")
    }
}
