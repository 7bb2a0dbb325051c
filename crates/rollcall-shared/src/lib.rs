//! # Rollcall Shared
//!
//! Configuration, telemetry, constants, and common error types.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use error::AppError;
