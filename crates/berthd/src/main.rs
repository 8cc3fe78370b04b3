//! `berthd` — the berth placement CLI.
//!
//! Routes files onto a fixed pool of backend storage targets via the
//! consistent-hash ring.
//!
//! # Usage
//!
//! ```text
//! berthd place photo.jpg notes.txt     # copy onto the owning backends
//! berthd place -c berth.toml big.iso   # with a config file
//! berthd place --memory report.pdf     # dry run, nothing touches disk
//! berthd resolve photo.jpg             # print the owner, no copy
//! berthd resolve --key 5d41402a        # resolve a raw hash key
//! berthd ring                          # show the ring shape
//! ```

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use berth_placement::{content_key, Ring};
use berth_router::Router;
use berth_store::{FileStore, MemoryStore, ObjectStore};
use berth_types::StorageKind;
use clap::{Parser, Subcommand};
use tracing::info;

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "berthd",
    version,
    about = "Consistent-hash file placement router"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route files onto their owning backends and copy them there.
    Place {
        /// Files to place.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Override the storage root directory.
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Use the in-memory store (dry run; nothing touches disk).
        #[arg(short, long)]
        memory: bool,
    },

    /// Print the owning backend for a file's content, without copying.
    Resolve {
        /// File whose content should be hashed.
        file: Option<PathBuf>,

        /// Resolve a raw 32-bit hash key (hex) instead of file content.
        #[arg(short, long, value_parser = parse_hex_key)]
        key: Option<u32>,
    },

    /// Show the ring shape and per-backend vnode distribution.
    Ring,
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    match cli.command {
        Commands::Place {
            files,
            root,
            memory,
        } => cmd_place(config, files, root, memory).await,
        Commands::Resolve { file, key } => cmd_resolve(&config, file, key).await,
        Commands::Ring => cmd_ring(&config),
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Parse a hash key given as hex, with or without a `0x` prefix.
fn parse_hex_key(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hash key {s:?}: {e}"))
}

// -----------------------------------------------------------------------
// berthd place
// -----------------------------------------------------------------------

async fn cmd_place(
    mut config: CliConfig,
    files: Vec<PathBuf>,
    root: Option<PathBuf>,
    memory: bool,
) -> Result<()> {
    // CLI args override config file values.
    if let Some(root) = root {
        config.storage.root = Some(root);
    }
    if memory {
        config.storage.backend = "memory".to_string();
    }

    let store: Arc<dyn ObjectStore> = match config.storage_kind() {
        StorageKind::Memory => {
            info!("using in-memory store (dry run)");
            Arc::new(MemoryStore::new(u64::MAX))
        }
        StorageKind::File => {
            let root = config.storage_root();
            info!(root = %root.display(), "using file store");
            Arc::new(FileStore::new(&root).context("failed to initialize file store")?)
        }
    };

    let router = Router::new(config.ring_config(), store).context("failed to build ring")?;

    for file in &files {
        let placement = router
            .store(file)
            .await
            .with_context(|| format!("failed to place {}", file.display()))?;
        println!(
            "{} -> backend-{} (key {:08x})",
            file.display(),
            placement.backend,
            placement.key
        );
    }

    Ok(())
}

// -----------------------------------------------------------------------
// berthd resolve
// -----------------------------------------------------------------------

async fn cmd_resolve(config: &CliConfig, file: Option<PathBuf>, key: Option<u32>) -> Result<()> {
    let ring = Ring::new(config.ring_config()).context("failed to build ring")?;

    let key = match (file, key) {
        (_, Some(key)) => key,
        (Some(file), None) => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            content_key(&data)
        }
        (None, None) => anyhow::bail!("pass a file or --key"),
    };

    println!("key {:08x} -> backend-{}", key, ring.resolve(key));
    Ok(())
}

// -----------------------------------------------------------------------
// berthd ring
// -----------------------------------------------------------------------

fn cmd_ring(config: &CliConfig) -> Result<()> {
    let ring = Ring::new(config.ring_config()).context("failed to build ring")?;

    println!("backends:      {}", ring.backend_count());
    println!("virtual nodes: {}", ring.vnode_count());
    println!("arc width:     {}", ring.boundaries()[0]);
    for (id, count) in ring.vnode_distribution().iter().enumerate() {
        println!("  backend-{id}: {count} vnodes");
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_key_accepts_both_forms() {
        assert_eq!(parse_hex_key("5d41402a").unwrap(), 0x5d41_402a);
        assert_eq!(parse_hex_key("0x5d41402a").unwrap(), 0x5d41_402a);
        assert_eq!(parse_hex_key("0").unwrap(), 0);
        assert_eq!(parse_hex_key("ffffffff").unwrap(), u32::MAX);
    }

    #[test]
    fn test_parse_hex_key_rejects_garbage() {
        assert!(parse_hex_key("not-hex").is_err());
        assert!(parse_hex_key("").is_err());
        // Out of u32 range.
        assert!(parse_hex_key("1ffffffff").is_err());
    }

    #[test]
    fn test_cli_place_requires_files() {
        assert!(Cli::try_parse_from(["berthd", "place"]).is_err());
        assert!(Cli::try_parse_from(["berthd", "place", "a.txt"]).is_ok());
    }

    #[test]
    fn test_cli_place_flags_captured() {
        let cli = Cli::try_parse_from(["berthd", "place", "--memory", "-r", "/tmp/pool", "a.txt"])
            .expect("CLI should parse");

        match cli.command {
            Commands::Place {
                files,
                root,
                memory,
            } => {
                assert_eq!(files, vec![PathBuf::from("a.txt")]);
                assert_eq!(root, Some(PathBuf::from("/tmp/pool")));
                assert!(memory);
            }
            _ => panic!("expected Place command"),
        }
    }

    #[test]
    fn test_cli_resolve_key_flag() {
        let cli = Cli::try_parse_from(["berthd", "resolve", "--key", "0xdeadbeef"])
            .expect("CLI should parse");

        match cli.command {
            Commands::Resolve { file, key } => {
                assert_eq!(file, None);
                assert_eq!(key, Some(0xdead_beef));
            }
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_global_config_flag() {
        let cli = Cli::try_parse_from(["berthd", "ring", "-c", "berth.toml"])
            .expect("CLI should parse");
        assert_eq!(cli.config, Some(PathBuf::from("berth.toml")));
    }
}
