// src/config/mod.rs

//! Configuration loading and validation for pollwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the immutable [`WatchConfig`]
//!   consumed by the watcher (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like a positive interval (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, RunSection, WatchConfig, WatchSection, DEFAULT_CONFIG_PATH, DEFAULT_INTERVAL};
pub use validate::validate_config;
