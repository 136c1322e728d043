//! Error types for the API client.

use crate::api_error::ApiError;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, bad URL, or an undecodable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Returns the classified API error, if the server answered with a failure status.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(error) => Some(error),
            Error::RequestFailed => None,
        }
    }

    /// True when the server answered with a status registered as "not found".
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }
}
