//! Error types for the control-plane client.
//!
//! # Design
//! Failures that happen before any network I/O (bad base URL, body
//! serialization, credential application) get their own variants so callers
//! can tell a configuration mistake from a flaky network. Unexpected status
//! codes carry the server's decoded error message, falling back to the raw
//! body text when the body is not valid JSON.

use std::fmt;

use serde::Deserialize;

/// Failure applying credentials to an outgoing request.
#[derive(Debug, Clone)]
pub struct AuthError {
    pub message: String,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to set auth: {}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// Errors returned by client operations.
#[derive(Debug)]
pub enum Error {
    /// The configured base URL could not be parsed. No request was sent.
    UrlParse(String),

    /// The request body could not be encoded as JSON. No request was sent.
    Serialization(String),

    /// The authenticator refused to decorate the request. No request was sent.
    Auth(AuthError),

    /// The transport kept failing until the retry budget ran out.
    Transport { message: String, attempts: u32 },

    /// The server answered with a status the operation does not accept.
    /// `message` is the decoded error body, or the raw body text.
    UnexpectedStatus { status: u16, message: String },

    /// The response body could not be decoded into the expected type.
    /// The raw body is kept for diagnosis.
    Deserialization { message: String, body: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UrlParse(msg) => write!(f, "failed to parse base url: {msg}"),
            Error::Serialization(msg) => write!(f, "failed to encode body: {msg}"),
            Error::Auth(err) => err.fmt(f),
            Error::Transport { message, attempts } => {
                write!(f, "transport failed after {attempts} attempts: {message}")
            }
            Error::UnexpectedStatus { status, message } => {
                write!(f, "unexpected status {status}: {message}")
            }
            Error::Deserialization { message, body } => {
                write!(f, "failed to decode response: {message}, body: {body}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Error::Auth(err)
    }
}

/// Wire shape of a control-plane error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub message: String,
}

/// Best-effort message from an error body: the structured `message` field
/// when the body parses as an [`ErrorResponse`], the raw text otherwise.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ => body.to_string(),
    }
}
