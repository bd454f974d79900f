//! services/client/src/adapters/credentials.rs
//!
//! Credential provider backed by a captured `Cookie` header. The session
//! cookies are replayed verbatim and the CSRF token is read from the cookie
//! named by the configuration.

use tutorials_core::ports::CredentialProvider;

#[derive(Debug, Clone, Default)]
pub struct CookieCredentials {
    cookie_header: Option<String>,
    csrf_cookie_name: String,
}

impl CookieCredentials {
    pub fn new(cookie_header: Option<String>, csrf_cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_header: cookie_header.filter(|h| !h.trim().is_empty()),
            csrf_cookie_name: csrf_cookie_name.into(),
        }
    }

    /// Value of the cookie `name`, if present in the header.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookie_header.as_deref()?.split(';').find_map(|c| {
            let (key, value) = c.trim().split_once('=')?;
            (key == name).then_some(value)
        })
    }
}

impl CredentialProvider for CookieCredentials {
    fn csrf_token(&self) -> Option<String> {
        self.cookie(&self.csrf_cookie_name)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn session_cookies(&self) -> Option<String> {
        self.cookie_header.clone()
    }
}
