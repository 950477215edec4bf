//! HTTP protocol implementation.
//!
//! A small HTTP/1.1 server layer with keep-alive and streamed response bodies.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and parsing utilities
//! - **`response`**: HTTP response representation with builder pattern; bodies are
//!   either in memory or streamed from an async reader
//! - **`writer`**: Serializes the response head and streams the body in fixed-size chunks
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Head received (unparseable → 400, then Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Run the asset pipeline
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → skip request body → Reading (same connection)
//!               ├─ Close, oversized or Transfer-Encoding body → Closed
//!               └─ Write/stream error → Closed (body truncated)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use slingshot::assets::AssetHandler;
//! use slingshot::config::Config;
//! use slingshot::http::connection::Connection;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::load()?;
//!     let handler = Arc::new(AssetHandler::new(&cfg.static_files));
//!     let listener = TcpListener::bind(cfg.listen_addr()).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = Arc::clone(&handler);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, handler);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
