//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Typed settings persistence with environment overrides

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::{EmailSettings, Settings};
