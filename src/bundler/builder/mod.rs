//! Pipeline orchestration and coordination.
//!
//! This module provides the main [`Pipeline`] orchestrator that turns a
//! React Native or Expo project into a deployable update bundle.
//!
//! # Overview
//!
//! The pipeline:
//! 1. Installs dependencies with the project's package manager
//! 2. Detects the project kind, entry file, Metro config and Hermes settings
//! 3. Delegates to the bundler for the detected kind
//! 4. Compiles the bundle to Hermes byte-code when it applies
//! 5. Returns a [`BundleResult`](crate::bundler::BundleResult) with the bundle checksum
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for bundles
//! - [`orchestrator`] - Main [`Pipeline`] struct
//! - [`tool_detection`] - External tool availability checking

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::Pipeline;
