use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};
use reqwest::Url;

/// What a backend call presents on behalf of one app session: the bearer
/// token the backend returned at sign-in, if any, and the cookies it set.
///
/// Clones share the same cookie jar, so cookies the backend sets or clears
/// on any call are seen by every later call of that session.
#[derive(Debug, Clone, Default)]
pub struct BackendAuth {
    token: Option<String>,
    cookies: Option<Arc<Jar>>,
}

impl BackendAuth {
    /// No token and no cookie jar; cookies set by the backend are dropped
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Empty credentials with their own cookie jar
    pub fn with_cookie_jar() -> Self {
        Self {
            token: None,
            cookies: Some(Arc::new(Jar::default())),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            cookies: None,
        }
    }

    /// Same cookies, `token` added when present
    pub fn and_token(mut self, token: Option<String>) -> Self {
        if token.is_some() {
            self.token = token;
        }
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `Cookie` header value for a request to `url`
    pub fn cookie_header(&self, url: &Url) -> Option<HeaderValue> {
        self.cookies.as_ref().and_then(|jar| jar.cookies(url))
    }

    /// Remember the `Set-Cookie` headers of a response from `url`
    pub fn store_cookies(&self, headers: &HeaderMap, url: &Url) {
        if let Some(jar) = &self.cookies {
            let mut set_cookies = headers.get_all(SET_COOKIE).iter();
            jar.set_cookies(&mut set_cookies, url);
        }
    }
}
