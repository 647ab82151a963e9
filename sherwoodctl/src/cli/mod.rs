//! Command-line surface over a configured [`ExtensionRuntime`].

pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use sherwood_contracts::storage::StoragePort;
use sherwood_core::application::ExtensionRuntime;
use sherwood_core::favicon::HostFaviconResolver;
use sherwood_core::storage::{JsonFileStore, MemoryStore};
use tracing::debug;

use crate::config::{SherwoodConfig, StorageBackend};

pub use commands::execute;

#[derive(Debug, Parser)]
#[command(
    name = "sherwoodctl",
    about = "Drive the Sherwood new-tab extension core from the shell"
)]
pub struct Cli {
    /// Config file (TOML or JSON); overrides SHERWOOD_CONFIG_PATH and
    /// SHERWOOD_CONFIG_JSON
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run first-install (or update) initialisation
    Install {
        /// Treat as an extension update: keep the stored activation flag
        #[arg(long)]
        update: bool,
    },
    /// Print the activation flag and display settings
    Status,
    /// Flip the activation flag
    Toggle,
    /// List, add, remove or open bookmarks
    Bookmarks {
        #[command(subcommand)]
        action: BookmarksAction,
    },
    /// Show or change the grid dimensions
    Grid {
        #[command(subcommand)]
        action: GridAction,
    },
    /// Show or change display toggles
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Change the new-tab background
    Background {
        #[command(subcommand)]
        action: BackgroundAction,
    },
    /// Change the base icon size
    Size {
        #[command(subcommand)]
        action: SizeAction,
    },
    /// Send a raw JSON request to the background context
    Message {
        /// Request body, e.g. '{"action":"get-status"}'
        json: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BookmarksAction {
    /// Print one page of bookmarks
    List {
        /// Zero-based page; clamped into range
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Append a bookmark
    Add { title: String, url: String },
    /// Delete a bookmark by id
    Remove { id: String },
    /// Resolve a bookmark and navigate to it
    Open { id: String },
}

#[derive(Debug, Subcommand)]
pub enum GridAction {
    Show,
    /// Update any subset of the dimensions; values are clamped
    Set {
        #[arg(long)]
        columns: Option<u32>,
        #[arg(long)]
        rows: Option<u32>,
        #[arg(long)]
        gap: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    Show,
    /// Set one toggle, e.g. `settings set showUrls false`
    Set {
        toggle: String,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum BackgroundAction {
    /// Store an image url or data-url
    Set { image: String },
}

#[derive(Debug, Subcommand)]
pub enum SizeAction {
    /// Store the icon size in pixels (clamped to 10-50)
    Set { px: u32 },
}

/// Composes a runtime over the configured storage backend.
pub fn build_runtime(config: &SherwoodConfig) -> anyhow::Result<ExtensionRuntime> {
    let storage: Arc<dyn StoragePort> = match config.storage.backend {
        StorageBackend::Memory => match config.storage.item_quota_bytes {
            Some(limit) => Arc::new(MemoryStore::with_item_quota(limit)),
            None => Arc::new(MemoryStore::new()),
        },
        StorageBackend::File => {
            let path = config
                .storage
                .path
                .clone()
                .context("file storage selected without storage.path")?;
            debug!(path = %path.display(), "using file store");
            Arc::new(JsonFileStore::new(path))
        }
    };

    ExtensionRuntime::builder()
        .with_storage(storage)
        .with_favicons(Arc::new(HostFaviconResolver::new(
            config.favicon.endpoint.clone(),
            config.favicon.icon_size,
        )))
        .with_status_capacity(config.messaging.status_channel_capacity)
        .build()
        .map_err(|err| anyhow!("failed to compose runtime: {err}"))
}
