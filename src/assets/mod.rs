//! Static asset serving.
//!
//! Maps a request target onto a file beneath the configured root and
//! builds the response for it.
//!
//! ```text
//! decode → normalize → resolve → validate → stat → stream
//!                                   │          │       │
//!                               Forbidden  NotFound  ServerError
//! ```
//!
//! - **`path`**: target decoding, default document, resolution and the
//!   traversal guard
//! - **`handler`**: filesystem lookup and response construction
//! - **`error`**: the failure taxonomy and its HTTP mapping

pub mod error;
pub mod handler;
pub mod path;

pub use error::AssetError;
pub use handler::AssetHandler;
pub use path::RequestContext;
