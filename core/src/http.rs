//! HTTP requests and responses as plain data.
//!
//! # Design
//! The executor builds [`HttpRequest`] values and the transport turns them
//! into [`HttpResponse`] values. Keeping both as owned plain data means the
//! retry loop can resend a request verbatim and test doubles can script
//! responses without touching the network.

use serde::de::DeserializeOwned;

use crate::error::{error_message, Error};

/// HTTP method for a control-plane request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully prepared request: absolute URL, headers, and encoded body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value with the given (lowercase) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A fully drained response. The transport reads the body to completion on
/// every path, so no connection is ever left holding an open stream.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Check the status against the codes this operation accepts.
    ///
    /// Anything else becomes [`Error::UnexpectedStatus`] carrying the decoded
    /// error message (or the raw body when it is not valid JSON).
    pub fn expect_status(&self, expected: &[u16]) -> Result<(), Error> {
        if expected.contains(&self.status) {
            return Ok(());
        }
        Err(Error::UnexpectedStatus {
            status: self.status,
            message: error_message(&self.body),
        })
    }

    /// Decode the body as JSON, keeping the raw body on failure.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(&self.body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: self.body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn expect_status_accepts_any_listed_code() {
        assert!(response(204, "").expect_status(&[200, 204]).is_ok());
    }

    #[test]
    fn expect_status_decodes_structured_error_body() {
        let err = response(404, r#"{"error_code":404,"message":"no such topic"}"#)
            .expect_status(&[200])
            .unwrap_err();
        match err {
            Error::UnexpectedStatus { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such topic");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn expect_status_keeps_raw_body_when_not_json() {
        let err = response(502, "bad gateway").expect_status(&[200]).unwrap_err();
        match err {
            Error::UnexpectedStatus { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_decode_failure_carries_body() {
        let err = response(200, "not json").json::<Vec<String>>().unwrap_err();
        match err {
            Error::Deserialization { body, .. } => assert_eq!(body, "not json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = HttpRequest {
            method: Method::Get,
            url: "http://localhost/x".to_string(),
            headers: vec![("Authorization".to_string(), "Basic abc".to_string())],
            body: None,
        };
        assert_eq!(request.header("authorization"), Some("Basic abc"));
    }
}
