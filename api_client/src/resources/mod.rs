//! One wrapper group per backend area. Each operation is exactly one request.

pub mod ai;
pub mod auth;
pub mod control;
pub mod goals;
pub mod measurements;
pub mod operations;
pub mod processes;

pub use ai::AiApi;
pub use auth::AuthApi;
pub use control::ControlApi;
pub use goals::GoalsApi;
pub use measurements::MeasurementsApi;
pub use operations::OperationsApi;
pub use processes::ProcessesApi;
