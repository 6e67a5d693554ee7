//! Client-side state containers.
//!
//! Two containers with independent lifecycles:
//! - [`AuthStore`]: current user and bearer token, backed by durable
//!   [`Storage`] and restored on start-up.
//! - [`AppStore`]: transient UI selection (date, goal), in memory only.
//!
//! Both expose their state through `tokio::sync::watch` receivers; callers
//! change state only through the store's setters.

pub mod app;
pub mod auth;
pub mod error;
pub mod storage;

pub use app::{AppState, AppStore};
pub use auth::{AuthState, AuthStore};
pub use error::Error;
pub use storage::{FileStorage, MemoryStorage, Storage};
