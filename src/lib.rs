//! Slingshot - static asset server
//!
//! Serves the HTML/JS/CSS/image/audio assets of the slingshot browser game
//! from a fixed root directory over plain HTTP/1.1.

pub mod assets;
pub mod config;
pub mod http;
pub mod server;
