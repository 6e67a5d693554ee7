//! Request authentication.

use std::sync::Arc;

use log::*;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use store::auth::TOKEN_KEY;
use store::Storage;

use crate::error::Error;

/// Runs on every outgoing request before it is sent.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, Error>;
}

/// Standard Bearer token authentication backed by durable storage.
///
/// The token is read from storage on every request rather than cached, so a
/// login or logout takes effect on the very next call. Requests go out without
/// an `Authorization` header when no token is stored.
pub struct BearerTokenAuth {
    storage: Arc<dyn Storage>,
}

impl BearerTokenAuth {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    fn token(&self) -> Result<Option<SecretString>, Error> {
        Ok(self
            .storage
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(SecretString::new))
    }
}

impl Authenticator for BearerTokenAuth {
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        match self.token()? {
            Some(token) => Ok(request.bearer_auth(token.expose_secret())),
            None => {
                trace!("No stored token, sending request unauthenticated");
                Ok(request)
            }
        }
    }
}

/// Fixed bearer token, for callers that manage the token themselves.
pub struct StaticTokenAuth {
    token: SecretString,
}

impl StaticTokenAuth {
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }
}

impl Authenticator for StaticTokenAuth {
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(request.bearer_auth(self.token.expose_secret()))
    }
}

/// Sends every request without credentials.
pub struct NoAuth;

impl Authenticator for NoAuth {
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(request)
    }
}
