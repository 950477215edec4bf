//! Shared fixtures: an on-disk asset tree laid out like the game's.
//!
//! ```text
//! <tmp>/
//!   secret.txt              outside the root
//!   app-evil/secret.txt     sibling whose name extends the root's
//!   app/                    the asset root
//!     public/index.html
//!     public/img/sling.png
//!     assets/sample.<ext>   one file per MIME table entry, plus .xyz
//! ```

#![allow(dead_code)]

use slingshot::assets::AssetHandler;
use slingshot::config::Config;
use slingshot::http::request::{Method, Request, RequestBuilder};
use slingshot::http::response::{Body, Response};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;

pub const INDEX_HTML: &str = "<!doctype html><title>Slingshot</title>";
pub const SECRET: &str = "top secret";

pub struct Fixture {
    pub dir: TempDir,
    pub root: PathBuf,
    pub config: Config,
    pub handler: Arc<AssetHandler>,
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();

    std::fs::write(base.join("secret.txt"), SECRET).unwrap();
    std::fs::create_dir_all(base.join("app-evil")).unwrap();
    std::fs::write(base.join("app-evil/secret.txt"), SECRET).unwrap();

    let app = base.join("app");
    std::fs::create_dir_all(app.join("public/img")).unwrap();
    std::fs::create_dir_all(app.join("assets")).unwrap();
    std::fs::write(app.join("public/index.html"), INDEX_HTML).unwrap();
    std::fs::write(app.join("public/img/sling.png"), [0x89, b'P', b'N', b'G']).unwrap();

    for ext in [
        "html", "js", "css", "png", "jpg", "jpeg", "gif", "svg", "json", "wav", "mp3", "ico",
        "xyz",
    ] {
        std::fs::write(app.join(format!("assets/sample.{}", ext)), ext).unwrap();
    }

    let config = Config::new(&app, 0).unwrap();
    let handler = Arc::new(AssetHandler::new(&config.static_files));

    Fixture {
        root: config.static_files.root.clone(),
        dir,
        config,
        handler,
    }
}

pub fn request(method: Method, target: &str) -> Request {
    RequestBuilder::new()
        .method(method)
        .target(target)
        .build()
        .unwrap()
}

pub fn get(target: &str) -> Request {
    request(Method::GET, target)
}

/// Reads a response body to the end, streamed or not.
pub async fn body_of(response: Response) -> Vec<u8> {
    match response.body {
        Body::Full(bytes) => bytes,
        Body::Stream { mut reader, .. } => {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).await.unwrap();
            buf
        }
    }
}
