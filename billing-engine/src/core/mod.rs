//! Core: engine configuration
//!
//! - [`Config`] - environment-driven settings for logging and display

pub mod config;

pub use config::Config;
