//! # Rollcall API
//!
//! HTTP handlers, DTOs, and error mapping for the attendance service.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
