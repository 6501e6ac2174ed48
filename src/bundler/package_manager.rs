//! Package manager selection and dependency installation.

use std::{fmt, path::Path};

use crate::bundler::{
    Error, Result,
    exec::{CommandExecutor, Reporter},
};

/// JavaScript package managers recognised by their lock files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PackageManager {
    Yarn,
    Pnpm,
    Bun,
    Npm,
}

/// Lock files in priority order. The first one present decides.
const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
            PackageManager::Npm => "npm",
        }
    }

    /// The executable that launches this package manager.
    pub fn command(&self) -> &'static str {
        self.name()
    }

    /// Picks the package manager for `project_dir` from its lock files.
    ///
    /// Falls back to npm when no lock file is present.
    pub fn detect(project_dir: &Path) -> Self {
        LOCK_FILES
            .iter()
            .find(|(file, _)| project_dir.join(file).is_file())
            .map(|(file, pm)| {
                log::debug!("Found {}, using {}", file, pm.name());
                *pm
            })
            .unwrap_or(PackageManager::Npm)
    }

    /// Runs `<command> install` in `project_dir`.
    pub async fn install<E: CommandExecutor>(
        &self,
        project_dir: &Path,
        executor: &E,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        reporter.step(&format!("Installing dependencies with {}", self.name()));

        executor
            .run(project_dir, self.command(), &["install".to_string()])
            .await
            .map_err(|e| Error::InstallFailed {
                package_manager: self.name().to_string(),
                source: Box::new(e),
            })?;

        reporter.info("Dependencies installed");
        Ok(())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detects the package manager for `project_dir` and installs dependencies with it.
pub async fn install_dependencies<E: CommandExecutor>(
    project_dir: &Path,
    executor: &E,
    reporter: &dyn Reporter,
) -> Result<PackageManager> {
    let pm = PackageManager::detect(project_dir);
    pm.install(project_dir, executor, reporter).await?;
    Ok(pm)
}
