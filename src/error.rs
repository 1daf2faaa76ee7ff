// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for proxyfetch
//!
//! Every failure of `head`/`get`/`post` comes back as one of these variants
//! instead of a collapsed "status 400" envelope. An HTTP 400 sent by the
//! server is a normal [`crate::Response`], never an [`Error`].

use thiserror::Error;

/// Result type alias for proxyfetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Status reported by [`Error::status`] for requests that never completed
pub const FAILED_REQUEST_STATUS: u16 = 400;

/// Main error type for proxyfetch
#[derive(Error, Debug)]
pub enum Error {
    /// DNS, connect, TLS or protocol failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request timeout fired before the transport answered
    #[error("Request timed out after {duration_ms}ms: {url}")]
    Timeout { duration_ms: u64, url: String },

    /// Proxy URL matched neither the SOCKS nor the HTTP(S) grammar
    #[error("Invalid proxy URL: {0}")]
    InvalidProxyUrl(String),

    /// POST issued without a body
    #[error("body is required for POST")]
    MissingBody,

    /// Declared-JSON body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// DOM construction failed
    #[error("DOM error: {0}")]
    Dom(String),

    /// Caller supplied a header name or value that is not valid HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a timeout error
    pub fn timeout(duration_ms: u64, url: impl Into<String>) -> Self {
        Error::Timeout {
            duration_ms,
            url: url.into(),
        }
    }

    /// Create an invalid proxy error
    pub fn invalid_proxy(proxy: impl Into<String>) -> Self {
        Error::InvalidProxyUrl(proxy.into())
    }

    /// Create a DOM error
    pub fn dom<S: Into<String>>(msg: S) -> Self {
        Error::Dom(msg.into())
    }

    /// Create an invalid header error
    pub fn invalid_header<S: Into<String>>(msg: S) -> Self {
        Error::InvalidHeader(msg.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if the failure came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Timeout { .. })
    }

    /// Check if the request was rejected before any network call was made
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidProxyUrl(_)
                | Error::MissingBody
                | Error::Url(_)
                | Error::InvalidHeader(_)
                | Error::Config(_)
        )
    }

    /// Status code for callers that expect the collapsed failure envelope.
    ///
    /// Always [`FAILED_REQUEST_STATUS`]; use the variant to tell failures apart.
    pub fn status(&self) -> u16 {
        FAILED_REQUEST_STATUS
    }
}
