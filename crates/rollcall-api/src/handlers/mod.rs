//! HTTP handlers

pub mod attendance;
pub mod health;
pub mod session;
