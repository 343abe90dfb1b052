//! Configuration: a small YAML file holding the listen address.
//!
//! Lives at `<config_dir>/dumpdeck/config.yml` and is created with defaults
//! on first run, so `dumpdeck listen` works out of the box.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Listen address for the ingestion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

impl Config {
    /// Default on-disk location: `<config_dir>/dumpdeck/config.yml`.
    pub fn default_path() -> Result<PathBuf, Error> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(dir.join("dumpdeck").join("config.yml"))
    }

    /// Load the config at `path`, writing the defaults first if the file
    /// does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            let cfg = Self::default();
            cfg.write_to(path)?;
            return Ok(cfg);
        }

        let raw = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        serde_yaml::from_str(&raw).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Serialize this config to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<(), Error> {
        let wrap = |e: Box<dyn std::error::Error + Send + Sync>| Error::Config {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| wrap(Box::new(e)))?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| wrap(Box::new(e)))?;
        fs::write(path, yaml).map_err(|e| wrap(Box::new(e)))
    }

    /// The socket address to bind, or an error for an unparsable host.
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| Error::Server(format!("invalid host {:?}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Human-readable listen address for the status bar.
    pub fn display_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
