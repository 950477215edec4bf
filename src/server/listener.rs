use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::assets::AssetHandler;
use crate::config::Config;
use crate::http::connection::Connection;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(cfg.listen_addr())
        .await
        .with_context(|| format!("binding {}", cfg.listen_addr()))?;

    let port = listener.local_addr()?.port();
    info!("Server running at http://localhost:{}/", port);
    info!(root = %cfg.static_files.root.display(), "Serving assets");

    serve(listener, Arc::new(AssetHandler::new(&cfg.static_files))).await
}

/// Accepts connections on an already bound listener, one task per
/// connection. Runs until the future is dropped.
pub async fn serve(listener: TcpListener, handler: Arc<AssetHandler>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                // e.g. EMFILE
                tracing::error!("Accept failed: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, handler);
            if let Err(e) = conn.run().await {
                tracing::warn!("Connection from {} ended abnormally: {:#}", peer, e);
            }
        });
    }
}
