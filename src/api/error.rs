//
//  obs-api
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Errors
//!
//! The OBS API reports failures with a non-success status code and a
//! `status` document:
//!
//! ```xml
//! <status code="unknown_group">
//!   <summary>Couldn't find Group 'foo'</summary>
//! </status>
//! ```
//!
//! [`check_response`] turns such responses into an [`ErrorResponse`], which
//! keeps the request method and URL, the response status and headers, and
//! the raw body alongside the decoded code and summary.

use std::fmt;

use percent_encoding::percent_decode_str;
use reqwest::blocking;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::api::predicate::PredicateError;
use crate::api::schema::{self, Field, FromXml, Schema, ToXml};
use crate::api::xml::{Element, XmlError};

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`crate::api::Client`] operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be sent or the response could not be read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error(transparent)]
    Api(Box<ErrorResponse>),

    /// A success response carried a body that is not the expected document.
    #[error("failed to decode response: {0}")]
    Decode(XmlError),

    /// A request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(XmlError),

    /// A request could not be assembled, e.g. its query parameters failed
    /// to serialize. Nothing was sent.
    #[error("failed to build request: {0}")]
    Build(#[source] reqwest::Error),

    /// A request path contains a `.` or `..` segment, which the URL layer
    /// would resolve into a different resource.
    #[error("invalid request path '{0}': dot segments are not allowed")]
    InvalidPath(String),

    /// An email lookup returned no users.
    #[error("no users found with email {0}")]
    NoUserWithEmail(String),

    /// An email lookup returned more than one user.
    #[error("found {count} users with email {email}")]
    AmbiguousEmail {
        /// Number of matching users
        count: usize,
        /// The email address looked up
        email: String,
    },

    /// A search value cannot be expressed as a predicate.
    #[error(transparent)]
    Predicate(#[from] PredicateError),

    /// The configured base URL is unusable.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A configured header value is not a valid HTTP header value.
    #[error("invalid value for header {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },
}

impl Error {
    /// Returns the API error, if this is one.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Api(response) => Some(response),
            _ => None,
        }
    }

    /// Returns the HTTP status of an API error.
    pub fn status(&self) -> Option<StatusCode> {
        self.api_error().map(|response| response.status)
    }
}

impl From<ErrorResponse> for Error {
    fn from(response: ErrorResponse) -> Self {
        Self::Api(Box::new(response))
    }
}

/// The `status` document returned with error responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Machine-readable error code, e.g. `unknown_group`.
    pub code: String,
    /// Human-readable description.
    pub summary: String,
}

const STATUS_SCHEMA: Schema<Status> = Schema {
    root: "status",
    fields: &[
        Field::Attribute {
            name: "code",
            get: |s| s.code.as_str(),
            set: |s, v| s.code = v,
        },
        Field::Text {
            element: "summary",
            get: |s| s.summary.as_str(),
            set: |s, v| s.summary = v,
        },
    ],
};

impl ToXml for Status {
    fn to_element(&self) -> Element {
        schema::encode(&STATUS_SCHEMA, self)
    }
}

impl FromXml for Status {
    const ELEMENT: &'static str = STATUS_SCHEMA.root;

    fn from_element(element: &Element) -> std::result::Result<Self, XmlError> {
        schema::decode(&STATUS_SCHEMA, element)
    }
}

/// A failed API call.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    /// Method of the request
    pub method: Method,
    /// Final URL of the request
    pub url: Url,
    /// Status of the response
    pub status: StatusCode,
    /// Headers of the response
    pub headers: HeaderMap,
    /// The `code` attribute of the status document, empty if absent
    pub code: String,
    /// The summary of the status document, or a description of why the body
    /// could not be read as one
    pub message: String,
    /// The raw response body
    pub body: Vec<u8>,
}

impl ErrorResponse {
    /// Builds an error from a response's parts and its full body.
    pub fn from_parts(method: Method, url: Url, status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        let (code, message) = match Status::from_xml(&body) {
            Ok(status) => (status.code, status.summary),
            Err(_) => (
                String::new(),
                format!("failed to parse unknown error format: '{}'", String::from_utf8_lossy(&body)),
            ),
        };

        Self {
            method,
            url,
            status,
            headers,
            code,
            message,
            body,
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = percent_decode_str(self.url.path()).decode_utf8_lossy();
        let host = self.url.host_str().unwrap_or_default();

        write!(f, "{} {}://{}", self.method, self.url.scheme(), host)?;
        if let Some(port) = self.url.port() {
            write!(f, ":{port}")?;
        }
        write!(f, "{}: {} {}", path, self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ErrorResponse {}

/// Returns `true` for the statuses the API uses to report success.
pub fn is_success(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK
            | StatusCode::CREATED
            | StatusCode::ACCEPTED
            | StatusCode::NO_CONTENT
            | StatusCode::NOT_MODIFIED
    )
}

/// Passes successful responses through and turns the rest into an [`ErrorResponse`].
///
/// The body of a failed response is read to the end before returning.
pub fn check_response(method: &Method, response: blocking::Response) -> std::result::Result<blocking::Response, ErrorResponse> {
    let status = response.status();
    if is_success(status) {
        return Ok(response);
    }

    let url = response.url().clone();
    let headers = response.headers().clone();

    let error = match response.bytes() {
        Ok(body) => ErrorResponse::from_parts(method.clone(), url, status, headers, body.to_vec()),
        Err(e) => ErrorResponse {
            method: method.clone(),
            url,
            status,
            headers,
            code: String::new(),
            message: format!("failed to read error response body: {e}"),
            body: Vec::new(),
        },
    };

    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_for(method: Method, url: &str, status: u16, body: &str) -> ErrorResponse {
        ErrorResponse::from_parts(
            method,
            Url::parse(url).unwrap(),
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_success_statuses() {
        for code in [200, 201, 202, 204, 304] {
            assert!(is_success(StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [203, 206, 301, 302, 400, 401, 404, 500] {
            assert!(!is_success(StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }

    #[test]
    fn test_status_document_is_decoded() {
        let err = error_for(
            Method::DELETE,
            "https://api.example.com/group/foo",
            404,
            r#"<status code="unknown_group"><summary>Couldn't find Group 'foo'</summary></status>"#,
        );
        assert_eq!(err.code, "unknown_group");
        assert_eq!(err.message, "Couldn't find Group 'foo'");
        assert_eq!(
            err.to_string(),
            "DELETE https://api.example.com/group/foo: 404 Couldn't find Group 'foo'"
        );
    }

    #[test]
    fn test_unparsable_body_is_quoted_verbatim() {
        let err = error_for(Method::GET, "http://localhost:3000/person/x", 500, "\"foo\"\n");
        assert_eq!(err.code, "");
        assert_eq!(err.message, "failed to parse unknown error format: '\"foo\"\n'");
        assert_eq!(err.body, b"\"foo\"\n");
    }

    #[test]
    fn test_display_keeps_port_and_decodes_path() {
        let err = error_for(
            Method::GET,
            "http://localhost:3000/person/a%20b?cmd=lock",
            403,
            "<status><summary>denied</summary></status>",
        );
        assert_eq!(err.to_string(), "GET http://localhost:3000/person/a b: 403 denied");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            Status::default(),
            Status {
                code: "unknown_user".into(),
                summary: "no such user".into(),
            },
        ] {
            let bytes = status.to_xml().unwrap();
            assert_eq!(Status::from_xml(&bytes).unwrap(), status);
        }
        assert_eq!(
            String::from_utf8(Status::default().to_xml().unwrap()).unwrap(),
            "<status><summary></summary></status>"
        );
    }

    #[test]
    fn test_error_accessors() {
        let err: Error = error_for(Method::GET, "https://api.example.com/group", 401, "").into();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(err.api_error().is_some());
        assert_eq!(Error::NoUserWithEmail("a@b".into()).status(), None);
    }
}
