// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for proxyfetch
//!
//! Request assembly, proxy routing, and content negotiation of response
//! bodies. The socket-level exchange is delegated to a [`Transport`].

mod client;
pub mod cookie;
mod mime;
mod negotiate;
pub mod proxy;
mod request;
mod response;
mod transport;

pub use client::{HttpClient, HttpClientConfig};
pub use cookie::CookieMap;
pub use mime::MimeClassification;
pub use negotiate::{negotiate, BodyAccessor, Supports};
pub use proxy::{Credentials, ProxyScheme, ProxyTarget, SocksVersion};
pub use request::RequestOptions;
pub use response::Response;
pub use transport::{
    BodyStream, RawResponse, RedirectPolicy, ReqwestTransport, Transport, TransportConfig,
    TransportRequest,
};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("proxyfetch/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const AUTHORIZATION: &str = "authorization";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
}
