//! Error types for the bundling pipeline.
//!
//! Every variant maps onto one [`ErrorKind`], so callers can tell a detection
//! problem (fix the project) from a tool failure (fix the environment) without
//! matching on message text.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

use super::settings::ProjectKind;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of a pipeline failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The project could not be understood (missing files, unknown kind, bad input).
    Detection,
    /// An external tool could not be launched, exited non-zero, or timed out.
    Execution,
    /// A tool exited successfully but its expected output is absent or ambiguous.
    PostCondition,
    /// The environment is missing something the requested pipeline needs.
    Configuration,
    /// Filesystem errors outside of the categories above.
    Io,
}

/// Errors returned by the bundling pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Free-form error raised via [`bail!`](crate::bail).
    #[error("{0}")]
    GenericError(String),

    /// I/O error with no further context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// I/O error tied to a specific path.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        context: &'static str,
        path: PathBuf,
        error: io::Error,
    },

    /// Invalid glob pattern while searching for artifacts.
    #[error("invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("project directory does not exist: {}", .0.display())]
    ProjectDirNotFound(PathBuf),

    #[error("no package.json found at {}", .0.display())]
    PackageJsonMissing(PathBuf),

    #[error("failed to parse {}: {source}", .path.display())]
    PackageJsonInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "could not determine project type from {}: neither \"expo\" nor \"react-native\" is listed in dependencies or devDependencies",
        .0.display()
    )]
    UnknownProjectKind(PathBuf),

    #[error("no entry file found in {} (tried: {})", .dir.display(), .candidates.join(", "))]
    EntryFileNotFound {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("invalid platform \"{0}\" (expected \"ios\" or \"android\")")]
    InvalidPlatform(String),

    #[error("invalid Hermes mode \"{0}\" (expected \"auto\", \"on\" or \"off\")")]
    InvalidHermesMode(String),

    #[error("no bundler available for project kind {0}")]
    UnsupportedProjectKind(ProjectKind),

    /// The program could not be resolved or spawned.
    #[error("`{tool}` not found: {reason}")]
    ToolNotFound { tool: String, reason: String },

    /// The program ran and exited non-zero.
    #[error("`{tool}` failed with exit code {}{}", format_code(.code), format_stderr(.stderr_tail))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        stderr_tail: Vec<String>,
    },

    #[error("`{tool}` timed out after {secs}s and was terminated")]
    Timeout { tool: String, secs: u64 },

    #[error("dependency install with {package_manager} failed: {source}")]
    InstallFailed {
        package_manager: String,
        #[source]
        source: Box<Error>,
    },

    /// The bundler exited successfully but left no bundle behind.
    #[error("bundler exited successfully but produced no bundle at {}", .0.display())]
    BundleNotProduced(PathBuf),

    #[error(
        "ambiguous Expo output: found {count} JavaScript files under {} and none in the expected locations ({})",
        .output_dir.display(),
        .searched.join(", ")
    )]
    ExpoBundleAmbiguous {
        output_dir: PathBuf,
        count: usize,
        searched: Vec<String>,
    },

    #[error(
        "Expo bundle not found under {} (searched {} and the whole output tree)",
        .output_dir.display(),
        .searched.join(", ")
    )]
    ExpoBundleNotFound {
        output_dir: PathBuf,
        searched: Vec<String>,
    },

    #[error(
        "Hermes is enabled but the hermesc compiler was not found (searched: {}). Install dependencies first or pass --hermes off",
        format_paths(.searched)
    )]
    HermescNotFound { searched: Vec<PathBuf> },

    #[error("hermesc not found at {}", .0.display())]
    HermescMissing(PathBuf),

    #[error("bundle not found at {}", .0.display())]
    BundleMissing(PathBuf),
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "<signal>".to_string(),
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_stderr(lines: &[String]) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        format!(":\n{}", lines.join("\n"))
    }
}

impl Error {
    /// Classifies this error into the pipeline taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ProjectDirNotFound(_)
            | Error::PackageJsonMissing(_)
            | Error::PackageJsonInvalid { .. }
            | Error::UnknownProjectKind(_)
            | Error::EntryFileNotFound { .. }
            | Error::InvalidPlatform(_)
            | Error::InvalidHermesMode(_)
            | Error::UnsupportedProjectKind(_) => ErrorKind::Detection,
            Error::ToolNotFound { .. }
            | Error::ToolFailed { .. }
            | Error::Timeout { .. }
            | Error::InstallFailed { .. } => ErrorKind::Execution,
            Error::BundleNotProduced(_)
            | Error::ExpoBundleAmbiguous { .. }
            | Error::ExpoBundleNotFound { .. } => ErrorKind::PostCondition,
            Error::HermescNotFound { .. } | Error::HermescMissing(_) | Error::BundleMissing(_) => {
                ErrorKind::Configuration
            }
            Error::GenericError(_)
            | Error::IoError(_)
            | Error::Fs { .. }
            | Error::GlobPattern(_) => ErrorKind::Io,
        }
    }
}

/// Attaches the failing path to an I/O result.
pub trait ErrorExt<T> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attaches a message to an `Option` or foreign `Result`.
pub trait Context<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
