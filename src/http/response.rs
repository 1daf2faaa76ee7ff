// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response envelope

use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

use super::cookie::{self, CookieMap};
use super::negotiate::{BodyAccessor, Supports};
use crate::dom::Document;
use crate::error::Result;

/// Completed HTTP exchange
#[derive(Debug, Clone)]
pub struct Response {
    /// `true` only for status 200 exactly
    pub ok: bool,
    /// Response status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Name/value pairs from `Set-Cookie`
    pub cookies: CookieMap,
    /// Final URL (after redirects)
    pub url: Url,
    /// Time until the body was buffered, in milliseconds
    pub elapsed_ms: u64,
    body: Option<BodyAccessor>,
}

impl Response {
    /// Create a new response. `body` is `None` for HEAD.
    pub fn new(
        status: u16,
        headers: HeaderMap,
        url: Url,
        elapsed_ms: u64,
        body: Option<BodyAccessor>,
    ) -> Self {
        let cookies = cookie::parse(&headers);
        Self {
            ok: status == 200,
            status,
            headers,
            cookies,
            url,
            elapsed_ms,
            body,
        }
    }

    /// Body accessor, absent for HEAD responses
    pub fn body(&self) -> Option<&BodyAccessor> {
        self.body.as_ref()
    }

    /// Available body views; all false without a body
    pub fn supports(&self) -> Supports {
        self.body.as_ref().map(BodyAccessor::supports).unwrap_or(Supports {
            text: false,
            json: false,
            dom: false,
            binary: false,
        })
    }

    /// Body as text
    pub fn text(&self) -> Option<String> {
        self.body.as_ref().map(BodyAccessor::text)
    }

    /// Body as JSON
    pub fn json(&self) -> Option<Result<serde_json::Value>> {
        self.body.as_ref().and_then(BodyAccessor::json)
    }

    /// Body as DOM
    pub fn dom(&self) -> Option<Result<Document>> {
        self.body.as_ref().and_then(BodyAccessor::dom)
    }

    /// Body as raw bytes
    pub fn binary(&self) -> Option<Bytes> {
        self.body.as_ref().and_then(BodyAccessor::binary)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}
