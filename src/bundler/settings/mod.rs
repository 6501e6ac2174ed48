//! Configuration and result types for bundling runs.
//!
//! This module provides the caller-facing option set, the enumerations shared
//! across the pipeline, and the structs that carry detection results and the
//! final artifact description.

mod builder;
mod kind;
mod options;
mod result;

pub use builder::BundleOptionsBuilder;
pub use kind::{HermesMode, Platform, ProjectKind};
pub use options::BundleOptions;
pub use result::{BundleResult, ProjectConfig};
