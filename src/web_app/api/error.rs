// web_app/api/error.rs - Errors surfaced by the paged fetch contract
//
// Callers never get a machine-readable error body: a failed status is just
// "Failed to fetch". The enum is Clone because deduplicated callers share
// one result.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status
    #[error("Failed to fetch")]
    Status { status: u16 },

    /// The body could not be decoded as a page response
    #[error("Failed to decode products: {0}")]
    Decode(String),

    /// No response at all (network down, CORS, no browser window)
    #[error("Network error: {0}")]
    Network(String),

    /// The request itself was invalid (page or limit of zero)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
