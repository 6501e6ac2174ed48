//! Main pipeline orchestration.
//!
//! This module provides the [`Pipeline`] that sequences install, detection,
//! bundling and Hermes compilation into one run.

use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;

use crate::bundler::{
    BundleOptions, BundleResult, Error, ErrorExt, ProjectConfig, ProjectKind, Result, detect,
    exec::{CommandExecutor, LogReporter, ProcessExecutor, Reporter},
    hermes,
    package_manager::install_dependencies,
    platform::{ProjectBundler, Strategy},
    utils::fs::with_suffix,
};

use super::{checksum::calculate_sha256, tool_detection};

/// Pipeline orchestrator.
///
/// Runs install → detect → bundle → compile strictly in sequence. Every step
/// either succeeds or ends the run; partial output is left where it is.
///
/// # Examples
///
/// ```no_run
/// use codepush_bundler::bundler::{BundleOptionsBuilder, Pipeline};
///
/// # async fn example() -> codepush_bundler::bundler::Result<()> {
/// let options = BundleOptionsBuilder::new()
///     .platform("ios")
///     .project_dir("./my-app")
///     .sourcemap(true)
///     .build()?;
///
/// let result = Pipeline::default().run(&options).await?;
/// println!("Bundle: {} ({})", result.bundle_path.display(), result.bundle_sha256);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E = ProcessExecutor> {
    executor: E,
    reporter: Box<dyn Reporter>,
    preflight: bool,
}

impl Default for Pipeline<ProcessExecutor> {
    fn default() -> Self {
        Self {
            executor: ProcessExecutor::new(),
            reporter: Box::new(LogReporter),
            preflight: true,
        }
    }
}

impl<E> std::fmt::Debug for Pipeline<E>
where
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("executor", &self.executor)
            .field("preflight", &self.preflight)
            .finish_non_exhaustive()
    }
}

impl<E: CommandExecutor> Pipeline<E> {
    /// Creates a pipeline that launches every tool through `executor`.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            reporter: Box::new(LogReporter),
            preflight: false,
        }
    }

    /// Routes progress messages to `reporter`.
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Warn up front about tools missing from `PATH`.
    pub fn with_preflight(mut self, preflight: bool) -> Self {
        self.preflight = preflight;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs the whole pipeline for `options`.
    ///
    /// # Process
    ///
    /// 1. Resolve the project directory (default: current directory) and check it exists
    /// 2. Install dependencies unless `skip_install`
    /// 3. Detect the project and apply entry-file / Metro config overrides
    /// 4. Bundle with the strategy for the detected kind
    /// 5. Compile to Hermes byte-code when it applies (React Native only)
    /// 6. Checksum the final bundle
    pub async fn run(&self, options: &BundleOptions) -> Result<BundleResult> {
        let reporter = self.reporter.as_ref();
        let project_dir = resolve_project_dir(options.project_dir.as_deref())?;

        if !options.skip_install {
            install_dependencies(&project_dir, &self.executor, reporter).await?;
        }

        reporter.step("Detecting project configuration");
        let config = apply_overrides(
            detect::detect(&project_dir, options.platform, options.hermes)?,
            options,
        );
        let hermes = if config.hermes_enabled {
            "enabled"
        } else {
            "disabled"
        };
        reporter.info(&format!(
            "{} project, entry {}, Hermes {}",
            config.kind,
            config.entry_file.display(),
            hermes
        ));

        let Some(strategy) = Strategy::for_kind(config.kind) else {
            return Err(Error::UnsupportedProjectKind(config.kind));
        };

        if self.preflight {
            tool_detection::preflight(options.sourcemap && config.hermes_enabled);
        }

        reporter.step(&format!("Bundling for {}", config.platform));
        let mut result = strategy.bundle(&config, options, &self.executor).await?;

        if config.hermes_enabled && config.kind == ProjectKind::ReactNative {
            self.compile_hermes(&config, options, &mut result).await?;
        } else if config.hermes_enabled {
            // Expo runs its own byte-code step during export.
            log::info!("Skipping Hermes compilation for {} project", config.kind);
        }

        result.bundle_sha256 = calculate_sha256(&result.bundle_path).await?;
        reporter.info(&format!("Bundle written to {}", result.bundle_path.display()));

        Ok(result)
    }

    async fn compile_hermes(
        &self,
        config: &ProjectConfig,
        options: &BundleOptions,
        result: &mut BundleResult,
    ) -> Result<()> {
        let hermesc = config
            .hermesc_path
            .as_deref()
            .ok_or_else(|| Error::HermescNotFound {
                searched: detect::hermesc_candidates(&config.project_dir),
            })?;

        let sourcemap = options.sourcemap.then(|| {
            result
                .sourcemap_path
                .clone()
                .unwrap_or_else(|| with_suffix(&result.bundle_path, ".map"))
        });

        let report = hermes::compile(
            &self.executor,
            self.reporter.as_ref(),
            hermesc,
            &result.bundle_path,
            sourcemap.as_deref(),
        )
        .await?;
        log::debug!("Hermes compile report: {:?}", report);

        result.hermes_applied = true;
        result.sourcemap_path = sourcemap.filter(|map| map.is_file());
        Ok(())
    }
}

/// Resolves the project directory to an absolute path that exists.
fn resolve_project_dir(project_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match project_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().fs_context("reading current directory", ".")?,
    };
    let dir = dir
        .absolutize()
        .fs_context("resolving project directory", &dir)?
        .into_owned();

    if !dir.is_dir() {
        return Err(Error::ProjectDirNotFound(dir));
    }
    Ok(dir)
}

/// Explicit options win over detected values.
fn apply_overrides(mut config: ProjectConfig, options: &BundleOptions) -> ProjectConfig {
    if let Some(entry_file) = &options.entry_file {
        config.entry_file = entry_file.clone();
    }
    if let Some(bundler_config) = &options.bundler_config {
        config.bundler_config = Some(bundler_config.clone());
    }
    config
}
