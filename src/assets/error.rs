use thiserror::Error;

use crate::http::response::{Response, StatusCode};

/// Ways a single asset request can fail.
///
/// Every variant is terminated at the request boundary and turned into a
/// short plain-text response; none of them reaches the accept loop.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Request target could not be percent-decoded.
    #[error("malformed request target: {0}")]
    MalformedRequest(String),

    /// Resolved path lies outside the asset root.
    #[error("path escapes the asset root")]
    Forbidden,

    /// Nothing servable at the resolved path.
    #[error("no regular file at the requested path")]
    NotFound,

    /// File could not be opened or read.
    #[error("stream failure: {0}")]
    StreamFailure(#[from] std::io::Error),

    /// Anything not classified above.
    #[error("unhandled fault: {0}")]
    UnhandledFault(String),
}

impl AssetError {
    pub fn status(&self) -> StatusCode {
        match self {
            AssetError::Forbidden => StatusCode::Forbidden,
            AssetError::NotFound => StatusCode::NotFound,
            AssetError::MalformedRequest(_)
            | AssetError::StreamFailure(_)
            | AssetError::UnhandledFault(_) => StatusCode::InternalServerError,
        }
    }

    /// The client-facing response. Bodies never carry the error detail.
    pub fn into_response(self) -> Response {
        match self.status() {
            StatusCode::Forbidden => Response::forbidden(),
            StatusCode::NotFound => Response::not_found(),
            _ => Response::server_error(),
        }
    }
}
