//! React Native and Expo bundling pipeline.
//!
//! Produces an over-the-air update payload from a project directory:
//! a JavaScript bundle (optionally compiled to Hermes byte-code), its
//! assets and an optional source map.
//!
//! # Module Organization
//!
//! - [`builder`] - The [`Pipeline`] orchestrator
//! - [`detect`] - Project kind, entry file, Metro config and Hermes detection
//! - [`exec`] - Subprocess and progress-reporting seams
//! - [`hermes`] - `hermesc` compilation and source-map composition
//! - [`package_manager`] - Lock-file based package manager selection and install
//! - [`platform`] - Per-kind bundler strategies
//! - [`settings`] - Options, enumerations and result types

pub mod builder;
pub mod detect;
pub mod error;
pub mod exec;
pub mod hermes;
pub mod package_manager;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{Pipeline, calculate_sha256};
pub use error::{Context, Error, ErrorExt, ErrorKind, Result};
pub use exec::{CommandExecutor, LogReporter, ProcessExecutor, Reporter, SilentReporter};
pub use hermes::{CompileReport, ComposeOutcome};
pub use package_manager::PackageManager;
pub use platform::{ExpoBundler, ProjectBundler, ReactNativeBundler, Strategy};
pub use settings::{
    BundleOptions, BundleOptionsBuilder, BundleResult, HermesMode, Platform, ProjectConfig,
    ProjectKind,
};
