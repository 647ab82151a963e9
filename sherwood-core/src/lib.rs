//! # Sherwood Core
//!
//! Logic core of the Sherwood new-tab extension: persisted preferences, the
//! paginated bookmark grid, and the activation flag relayed between the
//! extension's isolated contexts.
//!
//! ## Overview
//!
//! - **Persistence**: [`storage::SettingsStore`] over any
//!   [`StoragePort`](sherwood_contracts::storage::StoragePort), with an
//!   in-memory and a JSON-file backend
//! - **Bookmarks**: [`bookmarks::BookmarkCollection`] and the page arithmetic
//!   in [`layout`]
//! - **Activation**: [`activation::ActivationBroker`] and the
//!   [`activation::StatusBus`] fan-out
//! - **Preferences**: display toggles, grid, icon size and background image
//! - **Contexts**: background, content script, popup and new-tab page
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sherwood_core::application::ExtensionRuntime;
//! use sherwood_core::storage::MemoryStore;
//! use sherwood_model::{InstallReason, NewBookmark};
//!
//! async fn first_run() -> Result<(), Box<dyn std::error::Error>> {
//!     let runtime = ExtensionRuntime::builder()
//!         .with_storage(Arc::new(MemoryStore::new()))
//!         .build()?;
//!     runtime.background.on_installed(InstallReason::Install).await?;
//!
//!     let mut page = runtime.new_tab_page();
//!     page.load().await?;
//!     page.add_bookmark(&NewBookmark::new("Docs", "https://docs.rs"))
//!         .await?;
//!
//!     let state = runtime.popup().toggle().await?;
//!     println!("extension is {state}");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod activation;
pub mod application;
pub mod background_image;
pub mod bookmarks;
pub mod contexts;
pub mod error;
pub mod favicon;
pub mod host;
pub mod layout;
pub mod settings;
pub mod storage;

pub use error::{Result, SherwoodError};
