// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Proxy URL resolution
//!
//! Two grammars are accepted, checked in this order:
//!
//! - `socks<4|5>://[user:pass@]host[:port]`
//! - `http[s]://[user:pass@]rest-of-url`
//!
//! Anything else is rejected with [`Error::InvalidProxyUrl`]. Resolution is
//! pure; building the reqwest [`Proxy`] is a separate step so the target can
//! be inspected or cached by callers.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::HeaderValue;
use reqwest::Proxy;
use url::Url;

use crate::error::{Error, Result};

lazy_static! {
    static ref SOCKS_URL: Regex =
        Regex::new(r"^socks([45])://(?:([^:@/]*):([^@]*)@)?([^:@/]+)(?::(\d+))?/?$").unwrap();
    static ref HTTP_PROXY_URL: Regex =
        Regex::new(r"^(https?)://(?:([^:@/]*:[^@]*)@)?(.+)$").unwrap();
}

/// SOCKS protocol version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocksVersion {
    V4,
    V5,
}

impl SocksVersion {
    /// Version number as written in the URL scheme
    pub fn as_u8(&self) -> u8 {
        match self {
            SocksVersion::V4 => 4,
            SocksVersion::V5 => 5,
        }
    }

    fn scheme(&self) -> &'static str {
        match self {
            SocksVersion::V4 => "socks4",
            SocksVersion::V5 => "socks5",
        }
    }
}

/// Scheme used to reach an HTTP proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyScheme {
    Http,
    Https,
}

/// SOCKS username and password. Always both or neither.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where a request is routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyTarget {
    /// Connect straight to the destination
    Direct,
    /// Tunnel through a SOCKS4/5 proxy
    Socks {
        version: SocksVersion,
        host: String,
        /// `None` leaves the transport default (1080)
        port: Option<u16>,
        credentials: Option<Credentials>,
    },
    /// Route through an HTTP(S) proxy
    HttpProxy {
        scheme: ProxyScheme,
        /// Proxy URL with the credentials stripped
        uri: Url,
        /// `Basic <base64(user:pass)>`, sent as `Proxy-Authorization`
        basic_auth_token: Option<String>,
    },
}

impl ProxyTarget {
    /// Check if requests go out without a proxy
    pub fn is_direct(&self) -> bool {
        matches!(self, ProxyTarget::Direct)
    }

    /// Proxied connections never verify certificates
    pub fn accepts_invalid_certs(&self) -> bool {
        !self.is_direct()
    }

    /// Proxy host, if any
    pub fn host(&self) -> Option<&str> {
        match self {
            ProxyTarget::Direct => None,
            ProxyTarget::Socks { host, .. } => Some(host),
            ProxyTarget::HttpProxy { uri, .. } => uri.host_str(),
        }
    }

    /// Explicit proxy port, if any
    pub fn port(&self) -> Option<u16> {
        match self {
            ProxyTarget::Direct => None,
            ProxyTarget::Socks { port, .. } => *port,
            ProxyTarget::HttpProxy { uri, .. } => uri.port(),
        }
    }

    /// Build the reqwest dispatcher for this target. `Direct` yields `None`.
    pub fn to_proxy(&self) -> Result<Option<Proxy>> {
        match self {
            ProxyTarget::Direct => Ok(None),
            ProxyTarget::Socks {
                version,
                host,
                port,
                credentials,
            } => {
                let url = socks_url(*version, host, *port, credentials.as_ref())?;
                let proxy = Proxy::all(url.as_str())
                    .map_err(|e| Error::invalid_proxy(format!("{}: {}", url, e)))?;
                Ok(Some(proxy))
            }
            ProxyTarget::HttpProxy {
                uri,
                basic_auth_token,
                ..
            } => {
                let mut proxy = Proxy::all(uri.as_str())
                    .map_err(|e| Error::invalid_proxy(format!("{}: {}", uri, e)))?;
                if let Some(token) = basic_auth_token {
                    let mut value = HeaderValue::from_str(token)
                        .map_err(|e| Error::invalid_proxy(e.to_string()))?;
                    value.set_sensitive(true);
                    proxy = proxy.custom_http_auth(value);
                }
                Ok(Some(proxy))
            }
        }
    }
}

/// Classify a proxy URL. `None` means a direct connection.
pub fn resolve(proxy: Option<&str>) -> Result<ProxyTarget> {
    let Some(proxy) = proxy else {
        return Ok(ProxyTarget::Direct);
    };

    if let Some(caps) = SOCKS_URL.captures(proxy) {
        let version = match &caps[1] {
            "4" => SocksVersion::V4,
            _ => SocksVersion::V5,
        };
        let port = match caps.get(5) {
            Some(m) => Some(
                m.as_str()
                    .parse::<u16>()
                    .map_err(|_| Error::invalid_proxy(proxy))?,
            ),
            None => None,
        };
        let credentials = match (caps.get(2), caps.get(3)) {
            (Some(user), Some(pass)) => Some(Credentials {
                username: user.as_str().to_string(),
                password: pass.as_str().to_string(),
            }),
            _ => None,
        };

        return Ok(ProxyTarget::Socks {
            version,
            host: caps[4].to_string(),
            port,
            credentials,
        });
    }

    if let Some(caps) = HTTP_PROXY_URL.captures(proxy) {
        let scheme = match &caps[1] {
            "https" => ProxyScheme::Https,
            _ => ProxyScheme::Http,
        };
        let uri = Url::parse(&format!("{}://{}", &caps[1], &caps[3]))
            .map_err(|_| Error::invalid_proxy(proxy))?;
        let basic_auth_token = caps
            .get(2)
            .map(|userinfo| format!("Basic {}", STANDARD.encode(userinfo.as_str())));

        return Ok(ProxyTarget::HttpProxy {
            scheme,
            uri,
            basic_auth_token,
        });
    }

    Err(Error::invalid_proxy(proxy))
}

fn socks_url(
    version: SocksVersion,
    host: &str,
    port: Option<u16>,
    credentials: Option<&Credentials>,
) -> Result<Url> {
    let invalid = || Error::invalid_proxy(format!("{}://{}", version.scheme(), host));

    let mut url = Url::parse(&format!("{}://{}", version.scheme(), host)).map_err(|_| invalid())?;
    if port.is_some() {
        url.set_port(port).map_err(|_| invalid())?;
    }
    if let Some(creds) = credentials {
        url.set_username(&creds.username).map_err(|_| invalid())?;
        url.set_password(Some(&creds.password))
            .map_err(|_| invalid())?;
    }
    Ok(url)
}
