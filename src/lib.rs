//! Over-the-air update bundler library for React Native and Expo apps
//!
//! This library provides the bundling pipeline that turns a project into:
//! - A JavaScript bundle (or Hermes byte-code at the same path)
//! - Its assets directory
//! - An optional source map, composed across Hermes compilation
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use bundler::{BundleOptions, BundleOptionsBuilder, BundleResult, Pipeline};
pub use error::{CliError, Error, Result};
