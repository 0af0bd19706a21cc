// ABOUTME: Error taxonomy for the remote question API
// ABOUTME: Every variant is recoverable by falling back to local storage

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection refused, DNS failure, TLS error and similar
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Remote API returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The API answered with `success: false`
    #[error("Remote API reported failure")]
    Unsuccessful,
}
