//! Configuration module for ne-archive
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a built-in default matching the Nintendo
//! Enthusiast site profile, so running without a config file works.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ArchiveConfig, BackoffConfig, Config, SiteConfig};

// Re-export parser functions
pub use parser::load_config;
pub use validation::validate;
