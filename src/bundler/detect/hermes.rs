//! Hermes enablement detection.
//!
//! The native build files are scanned as plain text. Each platform has a token
//! table; the first token found decides. When no token is present the
//! decision falls back to the react-native version: 0.70 and later ship with
//! Hermes on by default.

use std::path::{Path, PathBuf};

use crate::bundler::{ErrorExt, HermesMode, Platform, Result};

/// Outcome of scanning a build file for a Hermes switch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HermesDetection {
    NotFound,
    Enabled,
    Disabled,
}

/// Gradle spellings, checked in order.
const ANDROID_TOKENS: &[(&str, HermesDetection)] = &[
    ("hermesEnabled = true", HermesDetection::Enabled),
    ("hermesEnabled = false", HermesDetection::Disabled),
    ("hermesEnabled.set(true)", HermesDetection::Enabled),
    ("hermesEnabled.set(false)", HermesDetection::Disabled),
    ("enableHermes: true", HermesDetection::Enabled),
    ("enableHermes: false", HermesDetection::Disabled),
    ("enableHermes = true", HermesDetection::Enabled),
    ("enableHermes = false", HermesDetection::Disabled),
];

/// Podfile spellings, checked in order.
const IOS_TOKENS: &[(&str, HermesDetection)] = &[
    (":hermes_enabled => true", HermesDetection::Enabled),
    (":hermes_enabled => false", HermesDetection::Disabled),
    ("hermes_enabled: true", HermesDetection::Enabled),
    ("hermes_enabled: false", HermesDetection::Disabled),
];

/// First react-native minor version with Hermes on by default.
const HERMES_DEFAULT_MINOR: u32 = 70;

/// Stand-in minor for react-native 1.x and later.
const POST_ZERO_MINOR: u32 = 100;

fn tokens(platform: Platform) -> &'static [(&'static str, HermesDetection)] {
    match platform {
        Platform::Android => ANDROID_TOKENS,
        Platform::Ios => IOS_TOKENS,
    }
}

/// Scans build-file text for an explicit Hermes switch.
pub fn scan(platform: Platform, content: &str) -> HermesDetection {
    tokens(platform)
        .iter()
        .find(|(token, _)| content.contains(token))
        .map(|(_, detection)| *detection)
        .unwrap_or(HermesDetection::NotFound)
}

/// Build files that may carry a Hermes switch, in the order they are read.
pub fn build_files(project_dir: &Path, platform: Platform) -> Vec<PathBuf> {
    match platform {
        Platform::Android => {
            let app = project_dir.join("android").join("app");
            vec![app.join("build.gradle"), app.join("build.gradle.kts")]
        }
        Platform::Ios => vec![project_dir.join("ios").join("Podfile")],
    }
}

/// Reads the platform build files and returns the first explicit switch found.
pub fn scan_build_files(project_dir: &Path, platform: Platform) -> Result<HermesDetection> {
    for path in build_files(project_dir, platform) {
        if !path.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&path).fs_context("reading", &path)?;
        let detection = scan(platform, &content);
        if detection != HermesDetection::NotFound {
            log::debug!("Hermes {:?} by {}", detection, path.display());
            return Ok(detection);
        }
    }
    Ok(HermesDetection::NotFound)
}

/// Extracts the effective minor version from a react-native version range.
///
/// `"^0.72.0"` yields 72. A major of 1 or more yields 100. Anything
/// unparseable yields 0.
pub fn parse_version_minor(version: &str) -> u32 {
    let cleaned = version
        .trim()
        .trim_start_matches(|c: char| "^~>=<!".contains(c) || c.is_whitespace());

    let mut parts = cleaned.split('.');
    let Some(Ok(major)) = parts.next().map(|p| p.trim().parse::<u32>()) else {
        return 0;
    };
    if major >= 1 {
        return POST_ZERO_MINOR;
    }
    parts
        .next()
        .and_then(|minor| minor.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Hermes default for a react-native version when no build file says otherwise.
pub fn default_for_version(react_native_version: Option<&str>) -> bool {
    react_native_version
        .map(parse_version_minor)
        .is_some_and(|minor| minor >= HERMES_DEFAULT_MINOR)
}

/// Decides whether Hermes applies.
///
/// An explicit mode wins, then an explicit build-file switch, then the
/// version default.
pub fn detect_hermes(
    project_dir: &Path,
    platform: Platform,
    mode: HermesMode,
    react_native_version: Option<&str>,
) -> Result<bool> {
    let enabled = match mode {
        HermesMode::On => true,
        HermesMode::Off => false,
        HermesMode::Auto => match scan_build_files(project_dir, platform)? {
            HermesDetection::Enabled => true,
            HermesDetection::Disabled => false,
            HermesDetection::NotFound => {
                let enabled = default_for_version(react_native_version);
                log::debug!(
                    "No Hermes switch in build files, react-native {} defaults to {}",
                    react_native_version.unwrap_or("<unknown>"),
                    if enabled { "on" } else { "off" }
                );
                enabled
            }
        },
    };
    Ok(enabled)
}
