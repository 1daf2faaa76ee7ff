// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie header codec
//!
//! Turns a name/value map into a `Cookie` request header and pulls the
//! name/value pairs back out of `Set-Cookie` response headers. Attributes
//! (Path, Expires, ...) are ignored; there is no jar.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::HeaderMap;

use super::headers::SET_COOKIE;

/// Cookie name to value mapping, kept in insertion order
pub type CookieMap = IndexMap<String, String>;

lazy_static! {
    static ref SET_COOKIE_PAIR: Regex = Regex::new(r"^([^=]*)=([^;]*)").unwrap();
}

/// Serialize cookies as a `Cookie` header value: `a=1; b=2`
pub fn stringify(cookies: &CookieMap) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collect name/value pairs from every `Set-Cookie` header.
///
/// Later headers win on duplicate names and keep the first position. Headers without `=` are skipped.
pub fn parse(headers: &HeaderMap) -> CookieMap {
    parse_set_cookies(
        headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok()),
    )
}

/// Collect name/value pairs from raw `Set-Cookie` values
pub fn parse_set_cookies<'a>(values: impl IntoIterator<Item = &'a str>) -> CookieMap {
    let mut cookies = CookieMap::new();
    for value in values {
        if let Some(caps) = SET_COOKIE_PAIR.captures(value) {
            cookies.insert(caps[1].to_string(), caps[2].to_string());
        }
    }
    cookies
}
