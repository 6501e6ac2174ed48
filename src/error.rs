//! Comprehensive error types for the command line tool.
//!
//! This module defines the top-level error with actionable error messages and recovery suggestions.

use thiserror::Error;

use crate::bundler::{self, ErrorKind};

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the command line tool
#[derive(Error, Debug)]
pub enum Error {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pipeline errors
    #[error("{0}")]
    Bundler(#[from] bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl Error {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let Error::Bundler(err) = self else {
            return match self {
                Error::Cli(_) => vec!["Run with --help to see accepted arguments".to_string()],
                _ => vec!["Check the error message above for specific details".to_string()],
            };
        };

        match err {
            bundler::Error::HermescNotFound { .. } => vec![
                "Install dependencies so node_modules contains hermes-engine".to_string(),
                "Or disable byte-code compilation with --hermes off".to_string(),
            ],
            bundler::Error::ToolNotFound { tool, .. } => vec![
                format!("Install {} and make sure it is on PATH", tool),
                "Bundling requires Node.js (npx) to be installed".to_string(),
            ],
            bundler::Error::InstallFailed { .. } => vec![
                "Run the package manager install by hand to see the full output".to_string(),
                "Pass --skip-install if dependencies are already installed".to_string(),
            ],
            bundler::Error::Timeout { .. } => {
                vec!["Raise --timeout or unset CODEPUSH_BUNDLE_TIMEOUT".to_string()]
            }
            bundler::Error::EntryFileNotFound { .. } => {
                vec!["Pass the entry point explicitly with --entry-file".to_string()]
            }
            bundler::Error::UnknownProjectKind(_) => vec![
                "Point --project-dir at the app root containing package.json".to_string(),
                "The project must depend on react-native or expo".to_string(),
            ],
            bundler::Error::ExpoBundleAmbiguous { .. }
            | bundler::Error::ExpoBundleNotFound { .. } => {
                vec!["Clear the output directory and export again".to_string()]
            }
            _ => match err.kind() {
                ErrorKind::Detection => {
                    vec!["Check --project-dir and the project's package.json".to_string()]
                }
                ErrorKind::Execution => {
                    vec!["Re-run with --verbose to see the tool's full output".to_string()]
                }
                ErrorKind::PostCondition => {
                    vec!["Check the bundler configuration (metro.config.js)".to_string()]
                }
                ErrorKind::Configuration | ErrorKind::Io => {
                    vec!["Check the error message above for specific details".to_string()]
                }
            },
        }
    }
}
