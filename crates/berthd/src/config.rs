//! TOML configuration for the berth CLI.

use std::path::{Path, PathBuf};

use berth_types::{RingConfig, StorageKind};
use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Backend pool and ring sizing.
    pub pool: PoolSection,
    /// Storage collaborator selection.
    pub storage: StorageSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[pool]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PoolSection {
    /// Number of backend storage targets.
    pub backends: usize,
    /// Number of virtual nodes on the ring.
    pub vnodes: usize,
}

impl Default for PoolSection {
    fn default() -> Self {
        Self {
            backends: 5,
            vnodes: 100,
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Backend type: `"file"` (default) or `"memory"`.
    pub backend: String,
    /// Root directory for the file store. Defaults to `~/.berth`.
    pub root: Option<PathBuf>,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            root: None,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Ring sizing from the `[pool]` section.
    pub fn ring_config(&self) -> RingConfig {
        RingConfig {
            backends: self.pool.backends,
            vnodes: self.pool.vnodes,
        }
    }

    /// Effective storage backend kind.
    pub fn storage_kind(&self) -> StorageKind {
        match self.storage.backend.as_str() {
            "memory" => StorageKind::Memory,
            _ => StorageKind::File,
        }
    }

    /// Effective root directory for the file store.
    pub fn storage_root(&self) -> PathBuf {
        self.storage.root.clone().unwrap_or_else(default_root)
    }
}

/// Default file-store root: `~/.berth`, or `./.berth` without a home dir.
fn default_root() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".berth"))
        .unwrap_or_else(|| PathBuf::from(".berth"))
}
