//! Hermes compiler discovery inside `node_modules`.

use std::path::{Path, PathBuf};

/// Directory name of the prebuilt `hermesc` for the host OS.
pub fn host_triplet() -> &'static str {
    if cfg!(target_os = "macos") {
        "osx-bin"
    } else if cfg!(target_os = "windows") {
        "win64-bin"
    } else {
        "linux64-bin"
    }
}

fn binary_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "hermesc.exe"
    } else {
        "hermesc"
    }
}

/// Locations searched for `hermesc`, highest priority first.
///
/// The standalone `hermes-engine` package takes precedence over the copy
/// bundled with react-native.
pub fn hermesc_candidates(project_dir: &Path) -> Vec<PathBuf> {
    let node_modules = project_dir.join("node_modules");
    let triplet = host_triplet();
    vec![
        node_modules
            .join("hermes-engine")
            .join(triplet)
            .join(binary_name()),
        node_modules
            .join("react-native")
            .join("sdks")
            .join("hermesc")
            .join(triplet)
            .join(binary_name()),
    ]
}

/// Returns the first existing `hermesc`, if any.
pub fn find_hermesc(project_dir: &Path) -> Option<PathBuf> {
    let found = hermesc_candidates(project_dir)
        .into_iter()
        .find(|path| path.is_file());
    match &found {
        Some(path) => log::debug!("Found hermesc at {}", path.display()),
        None => log::debug!("hermesc not found under {}", project_dir.display()),
    }
    found
}
