//! Detected project facts and the produced artifact description.

use std::path::PathBuf;

use serde::Serialize;

use super::{Platform, ProjectKind};

/// Facts detected about a project instance.
///
/// Created once by [`detect`](crate::bundler::detect::detect). The orchestrator
/// may overwrite `entry_file` and `bundler_config` from explicit options
/// before handing it to a bundler.
#[derive(Clone, Debug)]
pub struct ProjectConfig {
    /// Absolute project root.
    pub project_dir: PathBuf,
    pub kind: ProjectKind,
    pub platform: Platform,
    /// Entry file relative to `project_dir`.
    pub entry_file: PathBuf,
    /// Metro config, if one was found or given.
    pub bundler_config: Option<PathBuf>,
    /// Whether the bundle should be compiled to Hermes byte-code.
    pub hermes_enabled: bool,
    /// Located `hermesc` binary, if Hermes applies and one was found.
    pub hermesc_path: Option<PathBuf>,
}

/// Description of the produced update artifact.
///
/// `bundle_path` exists on disk whenever a `BundleResult` is returned.
#[derive(Clone, Debug, Serialize)]
pub struct BundleResult {
    pub bundle_path: PathBuf,
    pub assets_dir: PathBuf,
    pub sourcemap_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub hermes_applied: bool,
    pub project_kind: ProjectKind,
    pub platform: Platform,
    /// Hex SHA-256 of the final bundle file. Empty until the orchestrator fills it in.
    pub bundle_sha256: String,
}
