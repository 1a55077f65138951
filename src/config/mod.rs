//! Configuration module for migration runs
//!
//! This module provides the `MigrateConfig` struct and its builder. The
//! configuration is threaded explicitly into every pass; nothing below the
//! CLI reads the process environment.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::MigrateConfigBuilder;
pub use types::{LinkRewrite, MigrateConfig, Workspace};
