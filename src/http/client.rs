// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use super::cookie;
use super::headers as header_names;
use super::mime::MimeClassification;
use super::negotiate::negotiate;
use super::proxy;
use super::request::RequestOptions;
use super::response::Response;
use super::transport::{ReqwestTransport, Transport, TransportConfig, TransportRequest};
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Timeout used when a request sets none
    pub default_timeout: Option<Duration>,
    /// Connect timeout for the transport
    pub connect_timeout: Option<Duration>,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Log failed requests
    pub verbose: bool,
    /// Default headers
    pub default_headers: HeaderMap,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,application/json,*/*;q=0.8",
            ),
        );
        default_headers.insert(
            "accept-language",
            HeaderValue::from_static("en-US,en;q=0.5"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_timeout: None,
            connect_timeout: Some(Duration::from_secs(30)),
            max_redirects: 10,
            verbose: false,
            default_headers,
        }
    }
}

impl HttpClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set default timeout
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Set maximum redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Enable/disable failure logging
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Add default header
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let (name, value) = header_pair(name, value)
            .map_err(|_| Error::Config(format!("invalid default header {:?}", name)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Check settings the transport would otherwise reject at build time
    pub fn validate(&self) -> Result<()> {
        HeaderValue::from_str(&self.user_agent)
            .map_err(|_| Error::Config(format!("invalid user agent: {:?}", self.user_agent)))?;
        Ok(())
    }

    fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            user_agent: self.user_agent.clone(),
            max_redirects: self.max_redirects,
            connect_timeout: self.connect_timeout,
            default_headers: self.default_headers.clone(),
        }
    }
}

/// Request ready for the transport, plus the deadline it runs under
#[derive(Debug)]
pub(crate) struct PreparedRequest {
    pub(crate) request: TransportRequest,
    pub(crate) timeout: Option<Duration>,
}

/// HTTP client issuing HEAD/GET/POST with per-request proxy routing.
///
/// Holds no per-request state; clones share the transport.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.transport_config())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: HttpClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Execute a HEAD request. The response carries no body accessor.
    pub async fn head(&self, url: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
        self.request(Method::HEAD, url.as_ref(), options).await
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
        self.request(Method::GET, url.as_ref(), options).await
    }

    /// Execute a POST request. Fails with [`Error::MissingBody`] without a body.
    pub async fn post(&self, url: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
        self.request(Method::POST, url.as_ref(), options).await
    }

    async fn request(&self, method: Method, url: &str, options: RequestOptions) -> Result<Response> {
        let result = self.execute(method.clone(), url, options).await;
        if let Err(ref e) = result {
            if self.config.verbose {
                tracing::debug!(method = %method, url, error = %e, "Request failed");
            }
        }
        result
    }

    async fn execute(&self, method: Method, url: &str, options: RequestOptions) -> Result<Response> {
        let start = Instant::now();
        let PreparedRequest { request, timeout } = self.prepare(method.clone(), url, options)?;

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            direct = request.dispatcher.is_direct(),
            "Request"
        );

        let target = request.url.to_string();
        let send = self.transport.send(request);
        let raw = match timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| Error::timeout(limit.as_millis() as u64, target))??,
            None => send.await?,
        };

        let body = if method == Method::HEAD {
            None
        } else {
            let classification = MimeClassification::from_headers(&raw.headers);
            Some(negotiate(classification, raw.body).await?)
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(status = raw.status, url = %raw.url, time_ms = elapsed_ms, "Response");

        Ok(Response::new(raw.status, raw.headers, raw.url, elapsed_ms, body))
    }

    /// Assemble headers, body and dispatcher for one request
    pub(crate) fn prepare(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<PreparedRequest> {
        let RequestOptions {
            headers: extra_headers,
            cookies,
            token,
            query,
            body,
            redirect,
            proxy: proxy_url,
            timeout,
        } = options;

        let body = if method == Method::POST {
            Some(body.ok_or(Error::MissingBody)?)
        } else {
            None
        };

        let url = Url::parse(url)?;
        let dispatcher = proxy::resolve(proxy_url.as_deref())?;

        let mut headers = HeaderMap::new();
        for (name, value) in &extra_headers {
            let (name, value) = header_pair(name, value)?;
            headers.insert(name, value);
        }

        headers.insert(reqwest::header::HOST, host_header(&url)?);

        if let Some(token) = token {
            headers.insert(
                header_names::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::invalid_header(e.to_string()))?,
            );
        }

        if let Some(cookies) = cookies.filter(|c| !c.is_empty()) {
            headers.insert(
                header_names::COOKIE,
                HeaderValue::from_str(&cookie::stringify(&cookies))
                    .map_err(|e| Error::invalid_header(e.to_string()))?,
            );
        }

        let payload = body.map(|body| {
            headers.insert(
                header_names::CONTENT_TYPE,
                HeaderValue::from_static(body.content_type()),
            );
            headers.insert(header_names::CONTENT_LENGTH, HeaderValue::from(body.len()));
            body.into_payload()
        });

        Ok(PreparedRequest {
            request: TransportRequest {
                method,
                url,
                headers,
                query,
                body: payload,
                redirect,
                dispatcher,
            },
            timeout: timeout.or(self.config.default_timeout),
        })
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::try_from(name)
        .map_err(|e| Error::invalid_header(format!("{}: {}", name, e)))?;
    let value = HeaderValue::try_from(value)
        .map_err(|e| Error::invalid_header(format!("{}: {}", name, e)))?;
    Ok((name, value))
}

/// `host[:port]` of the target URL
fn host_header(url: &Url) -> Result<HeaderValue> {
    let host = url
        .host_str()
        .ok_or_else(|| Error::invalid_header(format!("no host in {}", url)))?;
    let value = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    HeaderValue::from_str(&value).map_err(|e| Error::invalid_header(e.to_string()))
}
