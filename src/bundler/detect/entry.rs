//! Entry file and Metro config discovery.

use std::path::{Path, PathBuf};

use super::package_json::PackageJson;
use crate::bundler::{Error, Platform, Result};

/// Metro config filenames, in priority order.
const METRO_CONFIGS: &[&str] = &["metro.config.js", "metro.config.ts"];

/// Finds the bundler entry file, relative to `project_dir`.
///
/// Tries `index.<platform>.js`, then `index.js`, then the `main` field of
/// `package.json` if the file it names exists.
pub fn detect_entry_file(
    project_dir: &Path,
    platform: Platform,
    package: &PackageJson,
) -> Result<PathBuf> {
    let mut candidates = vec![format!("index.{}.js", platform), "index.js".to_string()];

    if let Some(found) = candidates
        .iter()
        .find(|candidate| project_dir.join(candidate).is_file())
    {
        return Ok(PathBuf::from(found));
    }

    if let Some(main) = package.main.as_deref().filter(|m| !m.trim().is_empty()) {
        if project_dir.join(main).is_file() {
            return Ok(PathBuf::from(main));
        }
        candidates.push(format!("{} (package.json \"main\")", main));
    }

    Err(Error::EntryFileNotFound {
        dir: project_dir.to_path_buf(),
        candidates,
    })
}

/// Finds a Metro config at the project root. `.js` wins over `.ts`.
pub fn detect_bundler_config(project_dir: &Path) -> Option<PathBuf> {
    METRO_CONFIGS
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    fn package(main: Option<&str>) -> PackageJson {
        PackageJson {
            main: main.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn platform_specific_entry_wins() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.js");
        write(dir.path(), "index.ios.js");
        let entry = detect_entry_file(dir.path(), Platform::Ios, &package(None)).unwrap();
        assert_eq!(entry, PathBuf::from("index.ios.js"));
    }

    #[test]
    fn other_platform_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.js");
        write(dir.path(), "index.ios.js");
        let entry = detect_entry_file(dir.path(), Platform::Android, &package(None)).unwrap();
        assert_eq!(entry, PathBuf::from("index.js"));
    }

    #[test]
    fn generic_index_wins_over_main() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.js");
        write(dir.path(), "App.js");
        let entry =
            detect_entry_file(dir.path(), Platform::Android, &package(Some("App.js"))).unwrap();
        assert_eq!(entry, PathBuf::from("index.js"));
    }

    #[test]
    fn falls_back_to_main_field() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        write(dir.path(), "src/main.js");
        let entry =
            detect_entry_file(dir.path(), Platform::Android, &package(Some("src/main.js")))
                .unwrap();
        assert_eq!(entry, PathBuf::from("src/main.js"));
    }

    #[test]
    fn missing_main_target_lists_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let err = detect_entry_file(dir.path(), Platform::Ios, &package(Some("gone.js")))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("index.ios.js"));
        assert!(msg.contains("index.js"));
        assert!(msg.contains("gone.js"));
    }

    #[test]
    fn metro_js_wins_over_ts() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(detect_bundler_config(dir.path()), None);
        write(dir.path(), "metro.config.ts");
        assert_eq!(
            detect_bundler_config(dir.path()),
            Some(dir.path().join("metro.config.ts"))
        );
        write(dir.path(), "metro.config.js");
        assert_eq!(
            detect_bundler_config(dir.path()),
            Some(dir.path().join("metro.config.js"))
        );
    }
}
