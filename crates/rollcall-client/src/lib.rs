//! # Rollcall Client
//!
//! Client-side mirror of the attendance service: an HTTP API port with a
//! reqwest adapter, and a session-keyed state cache for the presentation
//! layer. The cache is never authoritative; every mutating decision is
//! validated server-side.

pub mod api;
pub mod cache;
pub mod error;
pub mod types;

pub use api::{AttendanceApi, HttpAttendanceApi};
pub use cache::{CachedSession, StateCache};
pub use error::ClientError;
pub use types::RemoteAttendanceRecord;
