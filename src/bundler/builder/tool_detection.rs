//! External tool availability checking.
//!
//! Pre-flight only: a missing tool is logged up front so the eventual
//! execution failure is not the first hint. The executor stays the authority.

use std::sync::LazyLock;

fn on_path(tool: &str) -> bool {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            true
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            false
        }
    }
}

/// Check if `npx` is available for launching the bundler CLIs.
///
/// Cached result to avoid repeated PATH scans.
pub static HAS_NPX: LazyLock<bool> = LazyLock::new(|| on_path("npx"));

/// Check if `node` is available for source-map composition.
pub static HAS_NODE: LazyLock<bool> = LazyLock::new(|| on_path("node"));

/// Logs a warning for each pipeline tool missing from `PATH`.
pub fn preflight(needs_node: bool) {
    if !*HAS_NPX {
        log::warn!("npx not found in PATH. Bundling will fail unless Node.js is installed.");
    }
    if needs_node && !*HAS_NODE {
        log::warn!(
            "node not found in PATH. Source maps cannot be composed after Hermes compilation."
        );
    }
}
