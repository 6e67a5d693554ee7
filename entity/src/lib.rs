//! Records exchanged with the IGAMS backend.
//!
//! The client never owns authoritative state: every type in this crate is a
//! transient copy of what the backend returned, or a payload the client sends
//! to request a change.

pub mod analysis;
pub mod daily_logs;
pub mod goals;
pub mod improvements;
pub mod measurements;
pub mod processes;
pub mod reading;
pub mod status;
pub mod timestamp;
pub mod users;

pub use reading::Reading;
pub use timestamp::Timestamp;

/// A type alias that represents any Entity's id field data type.
/// The backend issues opaque string ids (and synthetic ones such as
/// `"calculated"`), so no narrower type is assumed.
pub type Id = String;
