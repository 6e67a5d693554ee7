//! Error types for the `api_client` crate.
//!
//! Follows the same pattern as the other layers: a root `Error` struct holding
//! an error kind and the original cause.

use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;

/// Message shown when the backend gives no usable detail.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Top-level error type for api_client.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in api_client.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Http(HttpErrorKind),
    /// Durable storage could not be read while preparing a request.
    Storage,
}

/// Errors from HTTP operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    /// The client or a request could not be built. No request was sent.
    BuilderFailed,
    /// The request never produced a response (connection, timeout, TLS).
    Network,
    /// The backend answered with a non-2xx status.
    Status { code: u16, detail: Option<String> },
    /// The response body did not match the expected shape.
    Decode,
}

impl Error {
    pub fn status_code(&self) -> Option<u16> {
        match &self.error_kind {
            ErrorKind::Http(HttpErrorKind::Status { code, .. }) => Some(*code),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// The backend's explanation of a failed request, if it sent one.
    pub fn detail(&self) -> Option<&str> {
        match &self.error_kind {
            ErrorKind::Http(HttpErrorKind::Status { detail, .. }) => detail.as_deref(),
            _ => None,
        }
    }

    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        self.detail().unwrap_or(GENERIC_ERROR_MESSAGE).to_string()
    }

    pub(crate) fn status(code: u16, body: &str) -> Self {
        Error {
            source: if body.is_empty() {
                None
            } else {
                Some(body.to_string().into())
            },
            error_kind: ErrorKind::Http(HttpErrorKind::Status {
                code,
                detail: parse_detail(body),
            }),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Http(HttpErrorKind::Status { code, detail }) => match detail {
                Some(detail) => write!(f, "HTTP {code}: {detail}"),
                None => write!(f, "HTTP {code}"),
            },
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
            ErrorKind::Storage => write!(f, "Storage error while preparing request"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_decode() {
            ErrorKind::Http(HttpErrorKind::Decode)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Http(HttpErrorKind::Decode),
        }
    }
}

impl From<store::Error> for Error {
    fn from(err: store::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Storage,
        }
    }
}

/// Extracts the `detail` of an error body. A plain string is returned as is;
/// a validation error list is flattened to its messages.
fn parse_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let err = Error::status(401, r#"{"detail":"Incorrect email or password"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.detail(), Some("Incorrect email or password"));
        assert_eq!(err.to_string(), "HTTP 401: Incorrect email or password");
    }

    #[test]
    fn test_validation_detail_is_flattened() {
        let err = Error::status(
            422,
            r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"},{"loc":["body","password"],"msg":"field required"}]}"#,
        );
        assert_eq!(
            err.detail(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn test_non_json_body_falls_back_to_generic_message() {
        let err = Error::status(502, "<html>Bad Gateway</html>");
        assert_eq!(err.detail(), None);
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status_code(), Some(502));
    }
}
