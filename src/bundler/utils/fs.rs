//! File system utilities for bundling.
//!
//! Path helpers for the sidecar files the tools write next to a bundle
//! (`.map`, `.hbc`, `.hbc.map`) and idempotent file operations.

use crate::bundler::error::{ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Appends `suffix` to the full file name: `main.jsbundle` + `.map` → `main.jsbundle.map`.
///
/// Unlike [`Path::with_extension`] this never replaces an existing extension.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut path = path.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing", path),
    }
}

/// Moves `from` over `to`, replacing `to` if it exists.
pub async fn replace_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.fs_context("replacing", to)
}
