//! Enumerations describing what is being bundled and how.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::bundler::Error;

/// The mobile JavaScript framework flavor of a project.
///
/// Decides which external bundler is driven. Detected once per run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    #[default]
    Unknown,
    /// Bare React Native, bundled with `react-native bundle`.
    ReactNative,
    /// Expo managed or prebuild project, bundled with `expo export`.
    Expo,
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProjectKind::Unknown => "unknown",
            ProjectKind::ReactNative => "react-native",
            ProjectKind::Expo => "expo",
        })
    }
}

/// Target mobile platform.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// The identifier the bundler CLIs expect for `--platform`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            _ => Err(Error::InvalidPlatform(s.to_string())),
        }
    }
}

/// Caller override for Hermes byte-code compilation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HermesMode {
    /// Inspect the native build files and react-native version.
    #[default]
    Auto,
    On,
    Off,
}

impl fmt::Display for HermesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HermesMode::Auto => "auto",
            HermesMode::On => "on",
            HermesMode::Off => "off",
        })
    }
}

impl FromStr for HermesMode {
    type Err = Error;

    /// An empty string means [`HermesMode::Auto`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(HermesMode::Auto),
            "on" => Ok(HermesMode::On),
            "off" => Ok(HermesMode::Off),
            _ => Err(Error::InvalidHermesMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(" android ".parse::<Platform>().unwrap(), Platform::Android);
        assert!(matches!(
            "windows".parse::<Platform>(),
            Err(Error::InvalidPlatform(p)) if p == "windows"
        ));
    }

    #[test]
    fn empty_hermes_mode_is_auto() {
        assert_eq!("".parse::<HermesMode>().unwrap(), HermesMode::Auto);
        assert_eq!("OFF".parse::<HermesMode>().unwrap(), HermesMode::Off);
        assert!("maybe".parse::<HermesMode>().is_err());
    }
}
