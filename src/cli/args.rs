//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap,
//! with environment fallbacks and conversion into [`BundleOptions`].

use clap::Parser;
use std::{path::PathBuf, time::Duration};

use crate::bundler::{BundleOptions, BundleOptionsBuilder};
use crate::error::CliError;

/// Over-the-air update bundler for React Native and Expo apps
#[derive(Parser, Debug)]
#[command(
    name = "codepush_bundle",
    version,
    about = "Over-the-air update bundler for React Native and Expo apps",
    long_about = "Bundles a React Native or Expo project into a JavaScript bundle, assets and an optional source map.

Installs dependencies with the project's package manager, detects the project kind and entry file,
runs the matching bundler and compiles the bundle to Hermes byte-code when the project uses Hermes.

Usage:
  codepush_bundle --platform android --project-dir ./my-app
  codepush_bundle --platform ios --sourcemap --hermes off --output-dir ./dist
  codepush_bundle --platform android --skip-install -- --reset-cache

Exit code 0 = bundle guaranteed to exist at the reported path."
)]
pub struct Args {
    /// Target platform: ios or android
    #[arg(short, long, value_name = "PLATFORM", env = "CODEPUSH_BUNDLE_PLATFORM")]
    pub platform: String,

    /// Project root (default: current directory)
    #[arg(short = 'd', long, value_name = "DIR", env = "CODEPUSH_BUNDLE_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Entry file relative to the project root (default: detected)
    #[arg(short, long, value_name = "FILE")]
    pub entry_file: Option<PathBuf>,

    /// Output directory, relative to the project root unless absolute
    #[arg(short, long, value_name = "DIR", env = "CODEPUSH_BUNDLE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Bundle filename (React Native only; default depends on platform)
    #[arg(short, long, value_name = "NAME")]
    pub bundle_name: Option<String>,

    /// Produce a development bundle
    #[arg(long)]
    pub dev: bool,

    /// Emit a source map next to the bundle
    #[arg(short, long)]
    pub sourcemap: bool,

    /// Hermes byte-code compilation: auto, on or off
    #[arg(long, value_name = "MODE", default_value = "auto", env = "CODEPUSH_BUNDLE_HERMES")]
    pub hermes: String,

    /// Metro config file (default: detected)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not run the package manager's install step
    #[arg(long)]
    pub skip_install: bool,

    /// Kill any external tool still running after this many seconds
    #[arg(long, value_name = "SECS", env = "CODEPUSH_BUNDLE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Extra flags passed verbatim to the bundler
    #[arg(last = true, value_name = "BUNDLER_ARGS")]
    pub extra_args: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if self.timeout == Some(0) {
            return Err(CliError::InvalidArguments {
                reason: "--timeout must be at least 1 second".to_string(),
            });
        }

        if let Some(name) = &self.bundle_name {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(CliError::InvalidArguments {
                    reason: format!("--bundle-name must be a plain file name, got \"{}\"", name),
                });
            }
        }

        Ok(())
    }

    /// Subprocess timeout, if one was requested.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Converts the arguments into pipeline options.
    pub fn to_options(&self) -> crate::bundler::Result<BundleOptions> {
        let mut builder = BundleOptionsBuilder::new()
            .platform(&self.platform)
            .hermes(&self.hermes)
            .dev(self.dev)
            .sourcemap(self.sourcemap)
            .skip_install(self.skip_install)
            .extra_bundler_args(self.extra_args.iter().cloned());

        if let Some(dir) = &self.project_dir {
            builder = builder.project_dir(dir);
        }
        if let Some(entry) = &self.entry_file {
            builder = builder.entry_file(entry);
        }
        if let Some(dir) = &self.output_dir {
            builder = builder.output_dir(dir);
        }
        if let Some(name) = &self.bundle_name {
            builder = builder.bundle_name(name);
        }
        if let Some(config) = &self.config {
            builder = builder.bundler_config(config);
        }

        builder.build()
    }
}
