//! Configuration Module
//!
//! Provides the application configuration loaded from TOML plus the
//! store credentials read from the environment.
//!
//! ## Loading Order
//!
//! 1. `--config` flag or `VECTORINO_CONFIG` environment variable
//! 2. `vectorino.toml` in the current working directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! Unlike the credentials, nothing in the TOML file is secret.

mod app_config;
mod credentials;
pub mod defaults;
pub mod validation;

pub use app_config::*;
pub use credentials::Credentials;
