// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-request options and builder

use std::time::Duration;

use crate::body::BodyVariant;

use super::cookie::CookieMap;
use super::transport::RedirectPolicy;

/// Options for a single `head`/`get`/`post` call
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra request headers. `Host` is always replaced.
    pub headers: Vec<(String, String)>,
    /// Sent as the `Cookie` header
    pub cookies: Option<CookieMap>,
    /// Sent as `Authorization: Bearer <token>`
    pub token: Option<String>,
    /// Query string pairs appended to the URL
    pub query: Vec<(String, String)>,
    /// Request body, required for POST and ignored otherwise
    pub body: Option<BodyVariant>,
    /// Redirect handling; `None` uses the client default
    pub redirect: Option<RedirectPolicy>,
    /// `socks4://`, `socks5://`, `http://` or `https://` proxy URL
    pub proxy: Option<String>,
    /// Deadline for the transport to answer
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a cookie
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies
            .get_or_insert_with(CookieMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace all cookies
    pub fn cookies(mut self, cookies: CookieMap) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// Set bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set the body
    pub fn body(mut self, body: BodyVariant) -> Self {
        self.body = Some(body);
        self
    }

    /// Set redirect policy
    pub fn redirect(mut self, redirect: RedirectPolicy) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Route through a proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates() {
        let opts = RequestOptions::new()
            .header("x-custom", "1")
            .header("x-other", "2")
            .cookie("a", "1")
            .cookie("b", "2")
            .query("page", "3")
            .token("abc");

        assert_eq!(opts.headers.len(), 2);
        assert_eq!(opts.cookies.as_ref().map(|c| c.len()), Some(2));
        assert_eq!(opts.query, vec![("page".to_string(), "3".to_string())]);
        assert_eq!(opts.token.as_deref(), Some("abc"));
        assert!(opts.body.is_none());
    }

    #[test]
    fn test_defaults_are_empty() {
        let opts = RequestOptions::default();
        assert!(opts.proxy.is_none());
        assert!(opts.timeout.is_none());
        assert!(opts.redirect.is_none());
        assert!(opts.cookies.is_none());
    }
}
