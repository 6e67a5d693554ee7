//! Error types for the `domain` layer.
use api_client::error::{Error as ApiError, ErrorKind as ApiErrorKind, HttpErrorKind};
use entity::status::ImprovementStatus;
use std::error::Error as StdError;
use std::fmt;

/// Fallback text shown to the user when nothing more specific is known.
pub const GENERIC_ERROR_MESSAGE: &str = api_client::error::GENERIC_ERROR_MESSAGE;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. Lower layers (`api_client`, `store`) are translated here so
/// the binary only ever matches on domain kinds.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Errors raised on the client side before or instead of a request.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// A form failed validation; no request was sent.
    Validation(String),
    /// The user declined a confirmation prompt; no request was sent.
    Cancelled,
    /// An improvement cannot move between these statuses.
    InvalidTransition {
        from: ImprovementStatus,
        to: ImprovementStatus,
    },
    /// Durable storage could not be read or written.
    Storage,
    Other(String),
}

/// Errors reported by, or on the way to, the backend.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Unauthenticated,
    NotFound,
    /// Any other non-2xx response.
    Rejected(u16),
    Network,
    /// A response arrived but did not have the expected shape.
    Decode,
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Validation(message.into())),
        }
    }

    pub fn cancelled() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Cancelled),
        }
    }

    pub fn invalid_transition(from: ImprovementStatus, to: ImprovementStatus) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::InvalidTransition {
                from,
                to,
            }),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.error_kind == DomainErrorKind::Internal(InternalErrorKind::Cancelled)
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.error_kind == DomainErrorKind::External(ExternalErrorKind::Unauthenticated)
    }

    /// The backend's explanation, when the error came from a rejected request.
    pub fn detail(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<ApiError>())
            .and_then(ApiError::detail)
    }

    /// Text suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match &self.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Validation(message)) => message.clone(),
            DomainErrorKind::Internal(InternalErrorKind::Cancelled) => "Cancelled".to_string(),
            DomainErrorKind::Internal(InternalErrorKind::InvalidTransition { from, to }) => {
                format!("Cannot move an improvement from {from} to {to}")
            }
            _ => self.detail().unwrap_or(GENERIC_ERROR_MESSAGE).to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "Domain Error ({:?}): {}", self.error_kind, source),
            None => write!(f, "Domain Error ({:?})", self.error_kind),
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

// This is where we translate errors from the `api_client` layer to the `domain` layer.
impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        let error_kind = match &err.error_kind {
            ApiErrorKind::Http(HttpErrorKind::Status { code: 401, .. }) => {
                DomainErrorKind::External(ExternalErrorKind::Unauthenticated)
            }
            ApiErrorKind::Http(HttpErrorKind::Status { code: 404, .. }) => {
                DomainErrorKind::External(ExternalErrorKind::NotFound)
            }
            ApiErrorKind::Http(HttpErrorKind::Status { code, .. }) => {
                DomainErrorKind::External(ExternalErrorKind::Rejected(*code))
            }
            ApiErrorKind::Http(HttpErrorKind::Network) => {
                DomainErrorKind::External(ExternalErrorKind::Network)
            }
            ApiErrorKind::Http(HttpErrorKind::Decode) => {
                DomainErrorKind::External(ExternalErrorKind::Decode)
            }
            ApiErrorKind::Http(HttpErrorKind::BuilderFailed) => DomainErrorKind::Internal(
                InternalErrorKind::Other("Failed to build HTTP request".to_string()),
            ),
            ApiErrorKind::Storage => DomainErrorKind::Internal(InternalErrorKind::Storage),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<store::Error> for Error {
    fn from(err: store::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Storage),
        }
    }
}
