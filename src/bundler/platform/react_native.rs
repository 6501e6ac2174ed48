//! Bare React Native bundling via `react-native bundle`.

use std::path::Path;

use super::{NPX, ProjectBundler, path_arg, prepare_output_dir};
use crate::bundler::{
    BundleOptions, BundleResult, Error, Platform, ProjectConfig, Result, exec::CommandExecutor,
    utils::fs::with_suffix,
};

/// Bundle filename native React Native apps load for each platform.
pub fn default_bundle_name(platform: Option<Platform>) -> &'static str {
    match platform {
        Some(Platform::Ios) => "main.jsbundle",
        Some(Platform::Android) => "index.android.bundle",
        None => "index.bundle",
    }
}

/// Drives `npx react-native bundle`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReactNativeBundler;

impl ReactNativeBundler {
    pub fn new() -> Self {
        Self
    }

    /// Builds the `react-native bundle` argument list (everything after `npx`).
    pub fn command_args(
        config: &ProjectConfig,
        options: &BundleOptions,
        bundle_path: &Path,
        assets_dir: &Path,
    ) -> Vec<String> {
        let mut args = vec![
            "react-native".to_string(),
            "bundle".to_string(),
            "--entry-file".to_string(),
            path_arg(&config.entry_file),
            "--platform".to_string(),
            config.platform.to_string(),
            "--dev".to_string(),
            options.dev.to_string(),
            "--bundle-output".to_string(),
            path_arg(bundle_path),
            "--assets-dest".to_string(),
            path_arg(assets_dir),
        ];

        if options.sourcemap {
            args.push("--sourcemap-output".to_string());
            args.push(path_arg(&with_suffix(bundle_path, ".map")));
        }

        if let Some(metro_config) = &config.bundler_config {
            args.push("--config".to_string());
            args.push(path_arg(metro_config));
        }

        args.extend(options.extra_bundler_args.iter().cloned());
        args
    }
}

impl ProjectBundler for ReactNativeBundler {
    async fn bundle<E: CommandExecutor>(
        &self,
        config: &ProjectConfig,
        options: &BundleOptions,
        executor: &E,
    ) -> Result<BundleResult> {
        let output_dir = prepare_output_dir(config, options).await?;

        let bundle_name = options
            .bundle_name
            .as_deref()
            .unwrap_or_else(|| default_bundle_name(Some(config.platform)));
        let bundle_path = output_dir.join(bundle_name);
        let assets_dir = output_dir.clone();

        let args = Self::command_args(config, options, &bundle_path, &assets_dir);
        log::info!("Bundling {} for {}", config.entry_file.display(), config.platform);
        executor.run(&config.project_dir, NPX, &args).await?;

        // A misconfigured Metro setup can exit zero without writing anything.
        if !bundle_path.is_file() {
            return Err(Error::BundleNotProduced(bundle_path));
        }

        let sourcemap_path = if options.sourcemap {
            let path = with_suffix(&bundle_path, ".map");
            if path.is_file() {
                Some(path)
            } else {
                log::warn!("Source map was requested but not produced at {}", path.display());
                None
            }
        } else {
            None
        };

        log::info!("✓ Created bundle: {}", bundle_path.display());

        Ok(BundleResult {
            bundle_path,
            assets_dir,
            sourcemap_path,
            output_dir,
            hermes_applied: false,
            project_kind: config.kind,
            platform: config.platform,
            bundle_sha256: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::ProjectKind;
    use std::path::PathBuf;

    fn config() -> ProjectConfig {
        ProjectConfig {
            project_dir: PathBuf::from("/app"),
            kind: ProjectKind::ReactNative,
            platform: Platform::Android,
            entry_file: PathBuf::from("index.js"),
            bundler_config: None,
            hermes_enabled: false,
            hermesc_path: None,
        }
    }

    #[test]
    fn default_names() {
        assert_eq!(default_bundle_name(Some(Platform::Ios)), "main.jsbundle");
        assert_eq!(default_bundle_name(Some(Platform::Android)), "index.android.bundle");
        assert_eq!(default_bundle_name(None), "index.bundle");
    }

    #[test]
    fn minimal_command_line() {
        let options = BundleOptions::new(Platform::Android);
        let args = ReactNativeBundler::command_args(
            &config(),
            &options,
            Path::new("/out/index.android.bundle"),
            Path::new("/out"),
        );
        assert_eq!(
            args,
            [
                "react-native",
                "bundle",
                "--entry-file",
                "index.js",
                "--platform",
                "android",
                "--dev",
                "false",
                "--bundle-output",
                "/out/index.android.bundle",
                "--assets-dest",
                "/out",
            ]
        );
    }

    #[test]
    fn optional_flags_follow_required_ones() {
        let mut config = config();
        config.bundler_config = Some(PathBuf::from("/app/metro.config.js"));
        let options = BundleOptions {
            dev: true,
            sourcemap: true,
            extra_bundler_args: vec!["--reset-cache".into()],
            ..BundleOptions::new(Platform::Android)
        };
        let args = ReactNativeBundler::command_args(
            &config,
            &options,
            Path::new("/out/index.android.bundle"),
            Path::new("/out"),
        );
        assert_eq!(args[7], "true");
        assert_eq!(
            &args[12..],
            [
                "--sourcemap-output",
                "/out/index.android.bundle.map",
                "--config",
                "/app/metro.config.js",
                "--reset-cache",
            ]
        );
    }
}
