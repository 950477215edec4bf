//! Process configuration.
//!
//! Loaded once at startup from an optional YAML file and the environment,
//! then shared read-only with every connection.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_DOCUMENT: &str = "/public/index.html";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, e.g. "0.0.0.0" or "127.0.0.1"
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory outside of which nothing is ever served.
    /// Canonicalized by `Config::load_from`.
    pub root: PathBuf,
    /// Document served for the bare `/` target
    pub default_document: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            default_document: DEFAULT_DOCUMENT.to_string(),
        }
    }
}

impl Config {
    /// Builds a configuration serving `root` on `port` with every other
    /// setting at its default. The root is canonicalized.
    pub fn new(root: impl AsRef<Path>, port: u16) -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        cfg.server.port = port;
        cfg.static_files.root = root.as_ref().to_path_buf();
        cfg.finalize()
    }

    /// Loads the configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads the configuration using `var` to look up environment values.
    ///
    /// Precedence: environment, then the YAML file named by
    /// `SLINGSHOT_CONFIG`, then defaults.
    ///
    /// | Variable           | Setting                      |
    /// |--------------------|------------------------------|
    /// | `SLINGSHOT_CONFIG` | YAML file to read first      |
    /// | `PORT`             | `server.port`                |
    /// | `BIND_ADDR`        | `server.bind_addr`           |
    /// | `ASSET_ROOT`       | `static_files.root`          |
    pub fn load_from<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match var("SLINGSHOT_CONFIG") {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml_str(&raw)
                    .with_context(|| format!("parsing config file {}", path))?
            }
            None => Self::default(),
        };

        if let Some(port) = var("PORT") {
            cfg.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT value {:?}", port))?;
        }
        if let Some(addr) = var("BIND_ADDR") {
            cfg.server.bind_addr = addr;
        }
        if let Some(root) = var("ASSET_ROOT") {
            cfg.static_files.root = PathBuf::from(root);
        }

        cfg.finalize()
    }

    /// Parses a YAML document. Missing sections and fields keep their
    /// defaults; the root is not canonicalized here.
    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }

    fn finalize(mut self) -> anyhow::Result<Self> {
        let configured = &self.static_files.root;
        let root = std::fs::canonicalize(configured).with_context(|| {
            format!("asset root {} is not accessible", configured.display())
        })?;
        if !root.is_dir() {
            anyhow::bail!("asset root {} is not a directory", root.display());
        }
        self.static_files.root = root;

        if !self.static_files.default_document.starts_with('/') {
            self.static_files.default_document =
                format!("/{}", self.static_files.default_document);
        }

        Ok(self)
    }
}
