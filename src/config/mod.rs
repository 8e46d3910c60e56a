//! Configuration for a harvesting run
//!
//! This module provides the `HarvestConfig` struct and its type-safe builder
//! with validation and defaults matching the interactive workflow.

pub mod builder;
pub mod getters;
pub mod types;

pub use builder::{HarvestConfigBuilder, WithOutputDir, WithQuery};
pub use types::HarvestConfig;
