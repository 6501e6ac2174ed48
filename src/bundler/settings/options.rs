//! Caller-supplied knobs for one pipeline run.

use std::path::PathBuf;

use super::{HermesMode, Platform};

/// Everything a caller can configure for a bundling run.
///
/// Constructed via [`BundleOptionsBuilder`](super::BundleOptionsBuilder) or
/// directly. The pipeline only reads it.
///
/// # Examples
///
/// ```no_run
/// use codepush_bundler::bundler::{BundleOptions, HermesMode, Platform};
///
/// let options = BundleOptions {
///     hermes: HermesMode::Off,
///     skip_install: true,
///     ..BundleOptions::new(Platform::Android)
/// };
/// ```
#[derive(Clone, Debug)]
pub struct BundleOptions {
    pub platform: Platform,

    /// Entry file relative to the project root. Overrides detection.
    pub entry_file: Option<PathBuf>,

    /// Where the bundle and assets are written.
    ///
    /// Relative paths resolve against the project directory. Default: `build`.
    pub output_dir: Option<PathBuf>,

    /// Overrides the per-platform bundle filename (React Native only).
    pub bundle_name: Option<String>,

    pub dev: bool,

    pub sourcemap: bool,

    pub hermes: HermesMode,

    /// Extra flags appended verbatim to the bundler command line.
    pub extra_bundler_args: Vec<String>,

    /// Project root. Default: the current working directory.
    pub project_dir: Option<PathBuf>,

    /// Metro config path. Overrides detection.
    pub bundler_config: Option<PathBuf>,

    pub skip_install: bool,
}

impl BundleOptions {
    /// Default output directory name, relative to the project root.
    pub const DEFAULT_OUTPUT_DIR: &'static str = "build";

    /// Options with every knob at its default for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            entry_file: None,
            output_dir: None,
            bundle_name: None,
            dev: false,
            sourcemap: false,
            hermes: HermesMode::Auto,
            extra_bundler_args: Vec::new(),
            project_dir: None,
            bundler_config: None,
            skip_install: false,
        }
    }
}
