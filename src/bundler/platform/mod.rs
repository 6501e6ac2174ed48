//! Project-kind specific bundlers.
//!
//! Each [`ProjectBundler`] turns a detected [`ProjectConfig`] and the caller's
//! [`BundleOptions`] into one external bundler invocation, then confirms the
//! artifact it was supposed to produce.
//!
//! - [`ReactNativeBundler`] drives `npx react-native bundle`
//! - [`ExpoBundler`] drives `npx expo export`

mod expo;
mod react_native;

use std::{
    future::Future,
    path::{Path, PathBuf},
};

use path_absolutize::Absolutize;

use crate::bundler::{
    BundleOptions, BundleResult, ErrorExt, ProjectConfig, ProjectKind, Result,
    exec::CommandExecutor,
};

pub use expo::{ExpoBundler, find_expo_bundle};
pub use react_native::{ReactNativeBundler, default_bundle_name};

/// Launcher used for both bundler CLIs.
pub(crate) const NPX: &str = "npx";

/// Produces a raw JavaScript bundle for one kind of project.
pub trait ProjectBundler {
    /// Runs the bundler and returns the produced artifact.
    ///
    /// The returned `bundle_path` exists on disk.
    fn bundle<E: CommandExecutor>(
        &self,
        config: &ProjectConfig,
        options: &BundleOptions,
        executor: &E,
    ) -> impl Future<Output = Result<BundleResult>> + Send;
}

/// The bundler chosen for a detected project kind.
#[derive(Clone, Copy, Debug)]
pub enum Strategy {
    ReactNative(ReactNativeBundler),
    Expo(ExpoBundler),
}

impl Strategy {
    /// Picks the bundler for `kind`, or `None` if the kind has no bundler.
    pub fn for_kind(kind: ProjectKind) -> Option<Self> {
        match kind {
            ProjectKind::ReactNative => Some(Strategy::ReactNative(ReactNativeBundler::new())),
            ProjectKind::Expo => Some(Strategy::Expo(ExpoBundler::new())),
            ProjectKind::Unknown => None,
        }
    }
}

impl ProjectBundler for Strategy {
    async fn bundle<E: CommandExecutor>(
        &self,
        config: &ProjectConfig,
        options: &BundleOptions,
        executor: &E,
    ) -> Result<BundleResult> {
        match self {
            Strategy::ReactNative(bundler) => bundler.bundle(config, options, executor).await,
            Strategy::Expo(bundler) => bundler.bundle(config, options, executor).await,
        }
    }
}

/// Resolves the output directory against the project root and creates it.
pub(crate) async fn prepare_output_dir(
    config: &ProjectConfig,
    options: &BundleOptions,
) -> Result<PathBuf> {
    let requested = options
        .output_dir
        .as_deref()
        .unwrap_or(Path::new(BundleOptions::DEFAULT_OUTPUT_DIR));

    let output_dir = requested
        .absolutize_from(&config.project_dir)
        .fs_context("resolving output directory", requested)?
        .into_owned();

    tokio::fs::create_dir_all(&output_dir)
        .await
        .fs_context("creating output directory", &output_dir)?;

    Ok(output_dir)
}

/// Renders a path argument for a subprocess command line.
pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
