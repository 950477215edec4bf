//! Request → response for static assets.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::assets::error::AssetError;
use crate::assets::path::{self, RequestContext};
use crate::config::StaticFilesConfig;
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::Response;

/// Serves files from a single immutable root directory.
#[derive(Debug, Clone)]
pub struct AssetHandler {
    root: PathBuf,
    default_document: String,
}

impl AssetHandler {
    /// `cfg.root` is expected to be canonical already, as `Config` leaves it.
    pub fn new(cfg: &StaticFilesConfig) -> Self {
        Self {
            root: cfg.root.clone(),
            default_document: cfg.default_document.clone(),
        }
    }

    /// Runs the request on its own task so that a panic anywhere in the
    /// pipeline still produces a 500 instead of tearing down the connection.
    pub async fn handle_isolated(self: Arc<Self>, request: Request) -> Response {
        let target = request.target.clone();

        match tokio::spawn(async move { self.handle(&request).await }).await {
            Ok(response) => response,
            Err(join_err) => {
                let err = AssetError::UnhandledFault(join_err.to_string());
                error!(path = %target, error = %err, "Asset request task failed");
                err.into_response()
            }
        }
    }

    /// Produces exactly one response for `request`. Never fails.
    pub async fn handle(&self, request: &Request) -> Response {
        match self.serve(&request.target).await {
            Ok(response) => {
                debug!(
                    method = request.method.as_str(),
                    path = %request.target,
                    content_type = response.content_type().unwrap_or_default(),
                    "Serving asset"
                );
                response
            }
            Err(err) => {
                match &err {
                    AssetError::NotFound => {
                        debug!(path = %request.target, "Asset not found")
                    }
                    AssetError::Forbidden | AssetError::MalformedRequest(_) => {
                        warn!(path = %request.target, error = %err, "Rejected asset request")
                    }
                    AssetError::StreamFailure(_) | AssetError::UnhandledFault(_) => {
                        error!(path = %request.target, error = %err, "Asset request failed")
                    }
                }
                err.into_response()
            }
        }
    }

    /// The pipeline proper: decode, normalize, resolve, guard, stat, open.
    ///
    /// The returned response streams the file; nothing beyond the metadata
    /// has been read when this returns.
    pub async fn serve(&self, target: &str) -> Result<Response, AssetError> {
        let mut ctx = RequestContext::new(target);
        let resolved = ctx.resolve(&self.root, &self.default_document)?.to_path_buf();

        let metadata = tokio::fs::metadata(&resolved)
            .await
            .map_err(|_| AssetError::NotFound)?;
        if !metadata.is_file() {
            return Err(AssetError::NotFound);
        }

        // A symlink under the root may point anywhere; check where it lands.
        let real = tokio::fs::canonicalize(&resolved)
            .await
            .map_err(|_| AssetError::NotFound)?;
        if !path::is_within(&self.root, &real) {
            return Err(AssetError::Forbidden);
        }

        let content_type = mime::content_type_for(&resolved);
        let file = tokio::fs::File::open(&real).await?;

        Ok(Response::file(content_type, Box::new(file), metadata.len()))
    }
}
