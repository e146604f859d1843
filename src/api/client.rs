//
//  obs-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the OBS API
//!
//! This module provides the request/response pipeline every entity
//! operation goes through:
//!
//! 1. [`Client::request`] starts a [`RequestBuilder`] for a path below the
//!    base URL, with the `Accept` and `User-Agent` headers already set.
//! 2. The builder adds query parameters and an optional body, and
//!    [`RequestBuilder::build`] produces a [`Request`]. Requests never carry
//!    credentials.
//! 3. [`Client::send`], [`Client::send_to`] or [`Client::execute`] attach
//!    Basic authentication, perform the round trip, classify the status and
//!    consume the body.
//!
//! ## Features
//!
//! - Blocking transport, one round trip per call on the calling thread
//! - XML request bodies and typed XML responses
//! - Raw downloads into any [`std::io::Write`]
//! - Structured [`ErrorResponse`](crate::api::error::ErrorResponse) for
//!   non-success statuses

use std::fmt;
use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::percent_decode_str;
use reqwest::blocking;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Serialize;
use url::Url;

pub use reqwest::Method;
pub use reqwest::StatusCode;

use crate::api::error::{check_response, Error, Result};
use crate::api::schema::{FromXml, ToXml};

/// The public openSUSE build service.
pub const DEFAULT_BASE_URL: &str = "https://api.opensuse.org";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("obs-api/", env!("CARGO_PKG_VERSION"));

const XML_CONTENT: &str = "application/xml";

/// Configures and creates a [`Client`].
///
/// # Example
///
/// ```rust,no_run
/// use obs_api::api::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")
///     .credentials("alice", "secret")
///     .build()?;
/// # Ok::<(), obs_api::api::Error>(())
/// ```
#[derive(Clone)]
pub struct ClientBuilder {
    base_url: String,
    username: String,
    password: String,
    user_agent: String,
    insecure_skip_verify: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            password: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            insecure_skip_verify: false,
        }
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .finish()
    }
}

impl ClientBuilder {
    /// Creates a builder targeting [`DEFAULT_BASE_URL`] without credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API root. A single trailing `/` is removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the Basic authentication credentials.
    ///
    /// An empty username disables authentication.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the `User-Agent` header. An empty value sends no header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Disables TLS certificate verification.
    pub fn insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.insecure_skip_verify = insecure;
        self
    }

    /// Validates the configuration and creates the client.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBaseUrl`] if the base URL is not an absolute URL
    /// - [`Error::InvalidHeader`] if the user agent or credentials cannot be
    ///   sent as header values
    /// - [`Error::Transport`] if the HTTP client cannot be initialised
    pub fn build(self) -> Result<Client> {
        let trimmed = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        let base_url = Url::parse(trimmed).map_err(|e| Error::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let user_agent = if self.user_agent.is_empty() {
            None
        } else {
            Some(HeaderValue::from_str(&self.user_agent).map_err(|e| Error::InvalidHeader {
                name: "User-Agent",
                reason: e.to_string(),
            })?)
        };

        let auth = if self.username.is_empty() {
            None
        } else {
            let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
            let mut value = HeaderValue::from_str(&format!("Basic {token}")).map_err(|e| Error::InvalidHeader {
                name: "Authorization",
                reason: e.to_string(),
            })?;
            value.set_sensitive(true);
            Some(value)
        };

        let http = blocking::Client::builder()
            .danger_accept_invalid_certs(self.insecure_skip_verify)
            .build()?;

        tracing::debug!(base_url = %base_url, authenticated = auth.is_some(), "created API client");

        Ok(Client {
            http,
            base_url,
            auth,
            user_agent,
        })
    }
}

/// A client for the OBS XML API.
///
/// Cheap to share between threads; all operations borrow it immutably.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http: blocking::Client,
    /// API root without a trailing slash
    base_url: Url,
    /// Precomputed `Authorization` value, `None` when unauthenticated
    auth: Option<HeaderValue>,
    /// `User-Agent` value, `None` when disabled
    user_agent: Option<HeaderValue>,
}

impl Client {
    /// Shorthand for [`ClientBuilder::new`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns `true` if requests are sent with credentials.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Starts a request for `path`, which is appended to the base URL path.
    ///
    /// Paths with `.` or `..` segments, percent-encoded or not, fail in
    /// [`RequestBuilder::build`] with [`Error::InvalidPath`].
    ///
    /// # Parameters
    ///
    /// * `method` - The HTTP method
    /// * `path` - Path relative to the API root, starting with `/`
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = client
    ///     .request(Method::POST, "/group/foo")
    ///     .query(&options)
    ///     .build()?;
    /// client.execute(request)?;
    /// ```
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", self.base_url.path().trim_end_matches('/'), path);
        url.set_path(&joined);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(XML_CONTENT));
        if let Some(user_agent) = &self.user_agent {
            headers.insert(USER_AGENT, user_agent.clone());
        }

        RequestBuilder {
            inner: self.http.request(method, url).headers(headers),
            error: has_dot_segment(path).then(|| Error::InvalidPath(path.to_string())),
        }
    }

    /// Sends `request` and decodes the XML response body into `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] on network failure
    /// - [`Error::Api`] on a non-success status
    /// - [`Error::Decode`] if the body is not a `T` document
    pub fn send<T: FromXml>(&self, request: Request) -> Result<(Response, T)> {
        let (response, raw) = self.dispatch(request)?;
        let body = raw.bytes()?;
        tracing::trace!(bytes = body.len(), "read response body");

        let value = T::from_xml(&body).map_err(Error::Decode)?;
        Ok((response, value))
    }

    /// Sends `request` and copies the response body verbatim into `sink`.
    pub fn send_to<W: Write + ?Sized>(&self, request: Request, sink: &mut W) -> Result<Response> {
        let (response, mut raw) = self.dispatch(request)?;
        let copied = raw.copy_to(sink)?;
        tracing::trace!(bytes = copied, "copied response body");
        Ok(response)
    }

    /// Sends `request` and discards the response body.
    pub fn execute(&self, request: Request) -> Result<Response> {
        self.send_to(request, &mut io::sink())
    }

    /// Fetches any API path and copies the raw response body into `sink`.
    ///
    /// Nothing is written to `sink` when the server answers with an error.
    pub fn download<W: Write + ?Sized>(&self, path: &str, sink: &mut W) -> Result<()> {
        let request = self.request(Method::GET, path).build()?;
        self.send_to(request, sink)?;
        Ok(())
    }

    fn dispatch(&self, request: Request) -> Result<(Response, blocking::Response)> {
        let mut inner = request.inner;
        let method = inner.method().clone();
        tracing::debug!(method = %method, url = %inner.url(), "sending request");

        if let Some(auth) = &self.auth {
            inner.headers_mut().insert(AUTHORIZATION, auth.clone());
        }

        let raw = self.http.execute(inner)?;
        tracing::debug!(status = %raw.status(), "received response");

        let raw = check_response(&method, raw)?;
        let response = Response {
            status: raw.status(),
            headers: raw.headers().clone(),
            url: raw.url().clone(),
        };
        Ok((response, raw))
    }
}

/// Builds a [`Request`]. Created by [`Client::request`].
#[derive(Debug)]
pub struct RequestBuilder {
    inner: blocking::RequestBuilder,
    error: Option<Error>,
}

impl RequestBuilder {
    /// Adds query parameters from a serializable value.
    ///
    /// Fields the value skips during serialization are left out.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        self.inner = self.inner.query(query);
        self
    }

    /// Sets a raw body, sent verbatim.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.inner = self.inner.body(body.into());
        self
    }

    /// Sets an XML-encoded body.
    pub fn xml<B: ToXml + ?Sized>(mut self, body: &B) -> Self {
        match body.to_xml() {
            Ok(bytes) => self.inner = self.inner.body(bytes),
            Err(e) => {
                self.error.get_or_insert(Error::Encode(e));
            }
        }
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPath`] if the path has a dot segment
    /// - [`Error::Encode`] if the body failed to serialize
    /// - [`Error::Build`] if the query parameters could not be encoded
    pub fn build(self) -> Result<Request> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(Request {
            inner: self.inner.build().map_err(Error::Build)?,
        })
    }
}

/// Returns `true` if a segment of `path` is `.` or `..` once percent-decoded.
///
/// A backslash counts as a separator, as it does for `http` and `https` URLs.
fn has_dot_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| {
        let decoded = percent_decode_str(segment).decode_utf8_lossy();
        decoded == "." || decoded == ".."
    })
}

/// A fully built request, without credentials.
#[derive(Debug)]
pub struct Request {
    inner: blocking::Request,
}

impl Request {
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Returns the body bytes, if the request has a body.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.inner.body().and_then(|body| body.as_bytes())
    }
}

/// Metadata of a successful response. The body has already been consumed.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
}
