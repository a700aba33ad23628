//! HTTP basic authentication.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Basic auth credentials, pre-encoded as an `Authorization` header value.
pub(crate) struct BasicAuth {
    username: String,
    header: String,
}

impl BasicAuth {
    pub(crate) fn new(username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        Self {
            username: username.to_owned(),
            header: format!("Basic {encoded}"),
        }
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    /// `Authorization` header value.
    pub(crate) fn header(&self) -> &str {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        // RFC 7617 example
        let auth = BasicAuth::new("Aladdin", "open sesame");
        assert_eq!(auth.header(), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
        assert_eq!(auth.username(), "Aladdin");
    }

    #[test]
    fn test_basic_auth_password_with_colon() {
        let auth = BasicAuth::new("user", "pa:ss");
        let encoded = auth.header().strip_prefix("Basic ").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, b"user:pa:ss");
    }
}
