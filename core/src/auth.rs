//! Credential injection for outgoing requests.
//!
//! # Design
//! Authenticators are immutable capability objects: once constructed they
//! decorate requests and nothing else. There is no token refresh or rotation
//! here; callers rebuild the client when credentials change.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::AuthError;
use crate::http::HttpRequest;

/// Applies credentials to an outgoing request before it hits the network.
pub trait Authenticator: Send + Sync {
    fn apply(&self, request: &mut HttpRequest) -> Result<(), AuthError>;
}

/// HTTP basic authentication with an API key/secret pair.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl Authenticator for BasicAuth {
    fn apply(&self, request: &mut HttpRequest) -> Result<(), AuthError> {
        // RFC 7617: the user-id may not contain a colon.
        if self.username.contains(':') {
            return Err(AuthError {
                message: "basic auth username must not contain ':'".to_string(),
            });
        }
        let credentials = STANDARD.encode(format!("{}:{}", self.username, self.password));
        request
            .headers
            .push(("authorization".to_string(), format!("Basic {credentials}")));
        Ok(())
    }
}

/// Leaves requests untouched. The default until credentials are configured,
/// and handy as a stand-in for tests.
#[derive(Debug, Clone, Default)]
pub struct NoAuth;

impl Authenticator for NoAuth {
    fn apply(&self, _request: &mut HttpRequest) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    fn request() -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            url: "http://localhost/org/v2/environments".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn basic_auth_sets_standard_header() {
        let mut req = request();
        BasicAuth::new("user", "pass").apply(&mut req).unwrap();
        assert_eq!(req.header("authorization"), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn basic_auth_rejects_colon_in_username() {
        let mut req = request();
        let err = BasicAuth::new("us:er", "pass").apply(&mut req).unwrap_err();
        assert!(err.message.contains(':'));
        assert!(req.headers.is_empty());
    }

    #[test]
    fn no_auth_leaves_request_untouched() {
        let mut req = request();
        NoAuth.apply(&mut req).unwrap();
        assert!(req.headers.is_empty());
    }
}
