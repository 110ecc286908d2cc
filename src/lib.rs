//! ModTranslate - track and reconcile translations of Bethesda game mods
//!
//! This crate provides:
//! - String matching between original and translated plugin strings
//! - Per-file and per-mod translation status scans (basic, online, deep)
//! - A persistent store of user translations next to the base game translation
//! - Incremental status updates when translations are added or removed

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod masterlist;
pub mod mods;
pub mod scanner;
pub mod state;
pub mod status;
pub mod strings;
pub mod translations;

pub use app::App;
pub use config::Config;
pub use error::{StoreError, StoreResult};
