//! Configuration module for Spendboard
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SpendboardPaths;
pub use settings::Settings;
