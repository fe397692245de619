//! Error types

mod api;
mod body;
mod payload;

pub use api::*;
pub use body::*;
pub use payload::*;

/// Errors returned by [`SignupClient`](crate::SignupClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed or the server rejected it.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The payload could not be assembled.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl Error {
    /// Returns the first structured message supplied by the server, if any.
    pub fn first_message(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.first_message(),
            Self::Payload(_) => None,
        }
    }

    /// Returns the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code(),
            Self::Payload(_) => None,
        }
    }
}
