//! Page models for the IGAMS front end.
//!
//! Each page owns a [`LoadState`] for what it shows, loads through the
//! [`api_client::ApiClient`], and refetches after every write. Rendering is
//! left to the caller.

// Re-exports from `entity` so consumers of `domain` see one set of types. Goal
// and process types are re-exported from their page modules.
pub use entity::{
    analysis, daily_logs, improvements, measurements, status, users, Id, Reading, Timestamp,
};

pub mod control;
pub mod dashboard;
pub mod error;
pub mod goals;
pub mod load_state;
pub mod operations;
pub mod processes;
pub mod progress;
pub mod session;

pub use load_state::LoadState;
