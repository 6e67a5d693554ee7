//! Error types for the `store` crate.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for the store crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: StoreErrorKind,
}

#[derive(Debug, PartialEq)]
pub enum StoreErrorKind {
    /// Reading or writing the backing file failed.
    Io,
    /// A stored value could not be encoded or decoded.
    Serialization,
    /// The in-process lock guarding the storage was poisoned.
    Poisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "Store error ({:?}): {}", self.error_kind, source),
            None => write!(f, "Store error ({:?})", self.error_kind),
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

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: StoreErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: StoreErrorKind::Serialization,
        }
    }
}

pub(crate) fn poisoned() -> Error {
    Error {
        source: Some("storage lock poisoned".into()),
        error_kind: StoreErrorKind::Poisoned,
    }
}
