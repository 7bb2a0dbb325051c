//! Client errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request; `message` is surfaced verbatim to
    /// the user, no automatic retry.
    #[error("Server rejected request ({status}): {message}")]
    Api { status: u16, message: String },
}
