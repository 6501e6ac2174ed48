//! Reconciling the bundler's source map with the one `hermesc` emits.
//!
//! The bundler maps bundle positions to sources; `hermesc` maps byte-code
//! positions to bundle positions. react-native ships a script that composes
//! the two. Whatever happens, exactly one map is left at the bundler's map
//! path and the Hermes intermediate is gone.

use std::path::{Path, PathBuf};

use crate::bundler::{
    Result,
    exec::{CommandExecutor, Reporter},
    utils::fs::{remove_file, replace_file, with_suffix},
};

/// Location of the composition script inside a project.
const COMPOSE_SCRIPT: &[&str] = &[
    "node_modules",
    "react-native",
    "scripts",
    "compose-source-maps.js",
];

/// Which branch source-map reconciliation took.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeOutcome {
    /// No composition script; the Hermes map replaced the original.
    ScriptMissing,
    /// The script failed; the Hermes map replaced the original.
    ScriptFailed,
    /// The composed map replaced the original.
    Composed,
}

/// Finds `compose-source-maps.js` in `start` or the nearest ancestor that has one.
pub fn find_compose_script(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        let script = COMPOSE_SCRIPT
            .iter()
            .fold(dir.to_path_buf(), |p, c| p.join(c));
        script.is_file().then_some(script)
    })
}

/// Replaces `original_map` with the composition of it and `hermes_map`.
///
/// `bundle_dir` is where the composition script is searched from and where
/// `node` runs. Script failure is reported as a warning and falls back to
/// using the Hermes map as-is. Only filesystem errors while moving the final
/// map into place are returned.
pub async fn compose_source_maps<E: CommandExecutor>(
    executor: &E,
    reporter: &dyn Reporter,
    bundle_dir: &Path,
    original_map: &Path,
    hermes_map: &Path,
) -> Result<ComposeOutcome> {
    let Some(script) = find_compose_script(bundle_dir) else {
        reporter.warn(&format!(
            "compose-source-maps.js not found, using the Hermes source map as-is for {}",
            original_map.display()
        ));
        replace_file(hermes_map, original_map).await?;
        return Ok(ComposeOutcome::ScriptMissing);
    };

    let composed = with_suffix(original_map, ".composed");
    let args = vec![
        script.to_string_lossy().into_owned(),
        original_map.to_string_lossy().into_owned(),
        hermes_map.to_string_lossy().into_owned(),
        "-o".to_string(),
        composed.to_string_lossy().into_owned(),
    ];

    match executor.run(bundle_dir, "node", &args).await {
        Ok(()) if composed.is_file() => {
            replace_file(&composed, original_map).await?;
            remove_file(hermes_map).await?;
            log::debug!("Composed source map written to {}", original_map.display());
            Ok(ComposeOutcome::Composed)
        }
        outcome => {
            let reason = match outcome {
                Err(e) => e.to_string(),
                Ok(()) => format!("no output at {}", composed.display()),
            };
            reporter.warn(&format!(
                "Source map composition failed ({}), using the Hermes source map as-is",
                reason
            ));
            remove_file(&composed).await?;
            replace_file(hermes_map, original_map).await?;
            Ok(ComposeOutcome::ScriptFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_found_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir
            .path()
            .join("node_modules/react-native/scripts/compose-source-maps.js");
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        std::fs::write(&script, "").unwrap();
        let bundle_dir = dir.path().join("build/android");
        std::fs::create_dir_all(&bundle_dir).unwrap();

        assert_eq!(find_compose_script(&bundle_dir), Some(script.clone()));
        assert_eq!(find_compose_script(dir.path()), Some(script));
    }
}
