//! # api_client
//!
//! The single point of HTTP communication with the IGAMS backend.
//!
//! - One [`ApiClient`] per process, built on `reqwest`.
//! - An [`Authenticator`] runs on every outgoing request; the default
//!   [`BearerTokenAuth`] reads the token from durable storage each time.
//! - One wrapper group per backend area (auth, goals, processes, operations,
//!   measurements, control, ai). Each wrapper maps to exactly one request and
//!   returns the typed body. No retries, no caching.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = ApiClient::new(&config, storage)?;
//! let goals = client.goals().list().await?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod resources;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use auth::{Authenticator, BearerTokenAuth, StaticTokenAuth};
pub use client::ApiClient;
pub use error::{Error, ErrorKind, HttpErrorKind};
pub use http::{ApiClientBuilder, HttpClientConfig};
