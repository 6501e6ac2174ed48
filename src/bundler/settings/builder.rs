//! Builder for constructing [`BundleOptions`] from loosely typed input.

use super::{BundleOptions, HermesMode, Platform};
use std::path::{Path, PathBuf};

/// Builder for constructing [`BundleOptions`].
///
/// Accepts platform and Hermes mode as strings, the way they arrive from a
/// command line or environment, and validates them in [`build`](Self::build).
///
/// # Examples
///
/// ```no_run
/// use codepush_bundler::bundler::BundleOptionsBuilder;
///
/// # fn example() -> codepush_bundler::bundler::Result<()> {
/// let options = BundleOptionsBuilder::new()
///     .platform("android")
///     .hermes("off")
///     .project_dir("./my-app")
///     .sourcemap(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct BundleOptionsBuilder {
    platform: Option<String>,
    hermes: Option<String>,
    entry_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    bundle_name: Option<String>,
    dev: bool,
    sourcemap: bool,
    extra_bundler_args: Vec<String>,
    project_dir: Option<PathBuf>,
    bundler_config: Option<PathBuf>,
    skip_install: bool,
}

impl BundleOptionsBuilder {
    /// Creates a new options builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the target platform (`ios` or `android`).
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Sets the Hermes mode (`auto`, `on`, `off`).
    ///
    /// Default: `auto`
    pub fn hermes(mut self, mode: impl Into<String>) -> Self {
        self.hermes = Some(mode.into());
        self
    }

    pub fn entry_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn bundle_name(mut self, name: impl Into<String>) -> Self {
        self.bundle_name = Some(name.into());
        self
    }

    pub fn dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    pub fn sourcemap(mut self, sourcemap: bool) -> Self {
        self.sourcemap = sourcemap;
        self
    }

    /// Appends flags passed verbatim to the bundler.
    pub fn extra_bundler_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_bundler_args
            .extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the project root.
    ///
    /// Default: current working directory
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn bundler_config<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bundler_config = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    /// Builds the options.
    ///
    /// # Errors
    ///
    /// - `InvalidPlatform` if the platform is missing or not `ios`/`android`
    /// - `InvalidHermesMode` if the Hermes mode is not recognised
    pub fn build(self) -> crate::bundler::Result<BundleOptions> {
        let platform: Platform = self.platform.unwrap_or_default().parse()?;
        let hermes: HermesMode = self.hermes.unwrap_or_default().parse()?;

        Ok(BundleOptions {
            platform,
            entry_file: self.entry_file,
            output_dir: self.output_dir,
            bundle_name: self.bundle_name,
            dev: self.dev,
            sourcemap: self.sourcemap,
            hermes,
            extra_bundler_args: self.extra_bundler_args,
            project_dir: self.project_dir,
            bundler_config: self.bundler_config,
            skip_install: self.skip_install,
        })
    }
}
