use thiserror::Error;

/// Text shown to the user whenever a search request fails, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong ...";

/// Why a search request failed.
///
/// The variants only matter for logging. The session treats all of them as
/// the same failure and the UI shows [`FETCH_FAILED_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("search API answered with HTTP {0}")]
    Status(u16),

    #[error("request to search API failed: {0}")]
    Transport(String),

    #[error("could not decode search API response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
