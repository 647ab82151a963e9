//! Configuration loading and the `sherwoodctl` command handlers.
#![allow(missing_docs)]

pub mod cli;
pub mod config;

pub use config::{ConfigSource, SherwoodConfig};
