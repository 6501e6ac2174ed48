//! Project introspection.
//!
//! Turns a project directory into a [`ProjectConfig`]:
//!
//! 1. Project kind from `package.json` dependencies ([`package_json`])
//! 2. Entry file and Metro config ([`entry`])
//! 3. Hermes enablement from build files or react-native version ([`hermes`])
//! 4. `hermesc` location when Hermes applies ([`hermesc`])
//!
//! Detection only reads files. Running it twice on the same tree gives the
//! same answer.

pub mod entry;
pub mod hermes;
pub mod hermesc;
pub mod package_json;

use std::path::Path;

use path_absolutize::Absolutize;

use crate::bundler::{Error, ErrorExt, HermesMode, Platform, ProjectConfig, Result};

pub use entry::{detect_bundler_config, detect_entry_file};
pub use hermes::{HermesDetection, detect_hermes, parse_version_minor};
pub use hermesc::{find_hermesc, hermesc_candidates};
pub use package_json::{PackageJson, detect_kind};

/// Detects everything the bundlers need to know about `project_dir`.
///
/// # Errors
///
/// - `ProjectDirNotFound` if the directory does not exist
/// - `PackageJsonMissing` / `PackageJsonInvalid` for an unreadable manifest
/// - `UnknownProjectKind` if neither expo nor react-native is a dependency
/// - `EntryFileNotFound` listing every candidate tried
pub fn detect(
    project_dir: &Path,
    platform: Platform,
    hermes_mode: HermesMode,
) -> Result<ProjectConfig> {
    let project_dir = project_dir
        .absolutize()
        .fs_context("resolving project directory", project_dir)?
        .into_owned();

    if !project_dir.is_dir() {
        return Err(Error::ProjectDirNotFound(project_dir));
    }

    let package = PackageJson::load(&project_dir)?;
    let kind = detect_kind(&project_dir, &package)?;
    log::debug!("Detected {} project at {}", kind, project_dir.display());

    let entry_file = detect_entry_file(&project_dir, platform, &package)?;
    let bundler_config = detect_bundler_config(&project_dir);

    let hermes_enabled = detect_hermes(
        &project_dir,
        platform,
        hermes_mode,
        package.react_native_version(),
    )?;
    let hermesc_path = if hermes_enabled {
        find_hermesc(&project_dir)
    } else {
        None
    };

    Ok(ProjectConfig {
        project_dir,
        kind,
        platform,
        entry_file,
        bundler_config,
        hermes_enabled,
        hermesc_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::ProjectKind;

    fn project(package_json: &str, files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), package_json).unwrap();
        for file in files {
            let path = dir.path().join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "").unwrap();
        }
        dir
    }

    #[test]
    fn detects_react_native_project() {
        let dir = project(
            r#"{"dependencies": {"react-native": "0.72.0"}}"#,
            &["index.js", "metro.config.js"],
        );
        let config = detect(dir.path(), Platform::Android, HermesMode::Auto).unwrap();
        assert!(config.project_dir.is_absolute());
        assert_eq!(config.kind, ProjectKind::ReactNative);
        assert_eq!(config.entry_file, Path::new("index.js"));
        assert_eq!(
            config.bundler_config,
            Some(config.project_dir.join("metro.config.js"))
        );
        assert!(config.hermes_enabled);
        assert_eq!(config.hermesc_path, None);
    }

    #[cfg(unix)]
    #[test]
    fn locates_hermesc_only_when_hermes_applies() {
        let binary = format!("node_modules/hermes-engine/{}/hermesc", hermesc::host_triplet());
        let dir = project(
            r#"{"dependencies": {"react-native": "0.72.0"}}"#,
            &["index.js", binary.as_str()],
        );
        let on = detect(dir.path(), Platform::Ios, HermesMode::Auto).unwrap();
        assert!(on.hermesc_path.is_some());
        let off = detect(dir.path(), Platform::Ios, HermesMode::Off).unwrap();
        assert!(!off.hermes_enabled);
        assert_eq!(off.hermesc_path, None);
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = detect(&dir.path().join("nope"), Platform::Ios, HermesMode::Auto).unwrap_err();
        assert!(matches!(err, Error::ProjectDirNotFound(_)));
    }
}
