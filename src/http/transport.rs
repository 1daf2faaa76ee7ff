// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport layer
//!
//! [`Transport`] is the seam between request assembly and the socket-level
//! exchange. [`ReqwestTransport`] is the production implementation; tests
//! substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use url::Url;

use super::proxy::ProxyTarget;
use crate::error::{Error, Result};

/// Response body as it arrives from the transport
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// Redirect handling for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Follow up to this many redirects
    Follow(usize),
    /// Return 3xx responses as-is
    None,
}

impl RedirectPolicy {
    fn to_policy(self) -> Policy {
        match self {
            RedirectPolicy::Follow(max) => Policy::limited(max),
            RedirectPolicy::None => Policy::none(),
        }
    }
}

/// Fully assembled request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Bytes>,
    /// `None` uses the transport default
    pub redirect: Option<RedirectPolicy>,
    pub dispatcher: ProxyTarget,
}

/// Status line, headers and unread body of a response
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Final URL after redirects
    pub url: Url,
    pub body: BodyStream,
}

impl std::fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Performs the network exchange for an assembled request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return once the response head has arrived
    async fn send(&self, request: TransportRequest) -> Result<RawResponse>;
}

/// Transport settings shared by every client the transport builds
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub user_agent: String,
    pub max_redirects: usize,
    pub connect_timeout: Option<Duration>,
    pub default_headers: HeaderMap,
}

/// [`Transport`] backed by reqwest.
///
/// Environment proxy variables are ignored; only the request's
/// [`ProxyTarget`] decides routing. Direct requests with the default
/// redirect policy share one client.
/// Requests through a proxy, or with their own redirect policy, get a
/// dedicated client because reqwest binds both at client level.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    config: TransportConfig,
    direct: Client,
}

impl ReqwestTransport {
    /// Create a transport with the given settings
    pub fn new(config: TransportConfig) -> Result<Self> {
        let direct = Self::builder(&config, None).build()?;
        Ok(Self { config, direct })
    }

    fn builder(config: &TransportConfig, redirect: Option<RedirectPolicy>) -> reqwest::ClientBuilder {
        let redirect = redirect.unwrap_or(RedirectPolicy::Follow(config.max_redirects));
        let mut builder = Client::builder()
            .no_proxy()
            .user_agent(&config.user_agent)
            .redirect(redirect.to_policy())
            .default_headers(config.default_headers.clone());
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder
    }

    fn client_for(&self, dispatcher: &ProxyTarget, redirect: Option<RedirectPolicy>) -> Result<Client> {
        if dispatcher.is_direct() && redirect.is_none() {
            return Ok(self.direct.clone());
        }

        let mut builder = Self::builder(&self.config, redirect);
        if let Some(proxy) = dispatcher.to_proxy()? {
            builder = builder
                .proxy(proxy)
                .danger_accept_invalid_certs(dispatcher.accepts_invalid_certs());
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse> {
        let client = self.client_for(&request.dispatcher, request.redirect)?;

        let mut builder = client
            .request(request.method, request.url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.bytes_stream().map_err(Error::from).boxed();

        Ok(RawResponse {
            status,
            headers,
            url,
            body,
        })
    }
}
