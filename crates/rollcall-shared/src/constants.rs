//! Application-wide constants

/// Server-side OTP freshness window. A submission is rejected when the
/// submitted code was generated more than this many seconds ago. This is
/// the authoritative policy.
pub const OTP_FRESHNESS_WINDOW_SECS: i64 = 500;

/// Client-side OTP rotation cadence. Only the presentation layer uses this
/// to decide when to request a fresh code; the server never reads it.
pub const OTP_ROTATION_INTERVAL_SECS: i64 = 20;

/// Generated codes are 6-digit numerics drawn uniformly from this range.
pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

pub const OTP_LENGTH: usize = 6;
