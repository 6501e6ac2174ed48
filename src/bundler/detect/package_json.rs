//! `package.json` parsing and project-kind detection.

use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

use crate::bundler::{Error, ErrorExt, ProjectKind, Result};

/// The subset of `package.json` the detector reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageJson {
    /// Reads and parses `<project_dir>/package.json`.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join("package.json");
        if !path.is_file() {
            return Err(Error::PackageJsonMissing(path));
        }

        let content = std::fs::read_to_string(&path).fs_context("reading", &path)?;
        Self::parse(&content).map_err(|source| Error::PackageJsonInvalid { path, source })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Looks a package up in `dependencies`, then `devDependencies`.
    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.dependencies
            .get(name)
            .or_else(|| self.dev_dependencies.get(name))
            .map(String::as_str)
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependency(name).is_some()
    }

    pub fn react_native_version(&self) -> Option<&str> {
        self.dependency("react-native")
    }

    /// Expo is checked first: Expo projects also depend on react-native.
    pub fn project_kind(&self) -> ProjectKind {
        if self.has_dependency("expo") {
            ProjectKind::Expo
        } else if self.has_dependency("react-native") {
            ProjectKind::ReactNative
        } else {
            ProjectKind::Unknown
        }
    }
}

/// Detects the project kind, failing when neither framework is declared.
pub fn detect_kind(project_dir: &Path, package: &PackageJson) -> Result<ProjectKind> {
    match package.project_kind() {
        ProjectKind::Unknown => Err(Error::UnknownProjectKind(project_dir.join("package.json"))),
        kind => Ok(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expo_wins_over_react_native() {
        let pkg = PackageJson::parse(
            r#"{"dependencies": {"react-native": "0.74.1", "expo": "~51.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(pkg.project_kind(), ProjectKind::Expo);
    }

    #[test]
    fn expo_in_dev_dependencies_counts() {
        let pkg = PackageJson::parse(
            r#"{"dependencies": {"react-native": "0.74.1"}, "devDependencies": {"expo": "51.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(pkg.project_kind(), ProjectKind::Expo);
    }

    #[test]
    fn react_native_only() {
        let pkg =
            PackageJson::parse(r#"{"devDependencies": {"react-native": "^0.72.0"}}"#).unwrap();
        assert_eq!(pkg.project_kind(), ProjectKind::ReactNative);
        assert_eq!(pkg.react_native_version(), Some("^0.72.0"));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let pkg = PackageJson::parse(r#"{"name": "web", "dependencies": {"react": "18"}}"#)
            .unwrap();
        let err = detect_kind(Path::new("/p"), &pkg).unwrap_err();
        assert!(matches!(err, Error::UnknownProjectKind(_)));
        assert!(err.to_string().contains("react-native"));
    }

    #[test]
    fn missing_package_json() {
        let dir = tempfile::tempdir().unwrap();
        let err = PackageJson::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::PackageJsonMissing(_)));
    }

    #[test]
    fn malformed_package_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        let err = PackageJson::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::PackageJsonInvalid { .. }));
    }
}
