//! Expo bundling via `expo export`.
//!
//! `expo export` has moved its output around between SDK releases, so the
//! bundle is located after the fact rather than named up front.

use std::path::{Path, PathBuf};

use super::{NPX, ProjectBundler, path_arg, prepare_output_dir};
use crate::bundler::{
    BundleOptions, BundleResult, Context, Error, Platform, ProjectConfig, Result,
    exec::CommandExecutor, utils::fs::with_suffix,
};

/// Drives `npx expo export`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpoBundler;

impl ExpoBundler {
    pub fn new() -> Self {
        Self
    }

    /// Builds the `expo export` argument list (everything after `npx`).
    pub fn command_args(
        config: &ProjectConfig,
        options: &BundleOptions,
        output_dir: &Path,
    ) -> Vec<String> {
        let mut args = vec![
            "expo".to_string(),
            "export".to_string(),
            "--output-dir".to_string(),
            path_arg(output_dir),
            "--platform".to_string(),
            config.platform.to_string(),
        ];
        if options.dev {
            args.push("--dev".to_string());
        }
        args.extend(options.extra_bundler_args.iter().cloned());
        args
    }
}

/// Glob patterns for known `expo export` layouts, relative to the output directory.
fn expected_locations(platform: Platform) -> Vec<String> {
    vec![
        format!("bundles/{}-*.js", platform),
        format!("_expo/static/js/{}/*.js", platform),
    ]
}

fn first_glob_match(output_dir: &Path, relative: &str) -> Result<Option<PathBuf>> {
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&output_dir.to_string_lossy()),
        relative
    );
    let mut matches: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    matches.sort();
    Ok(matches.into_iter().next())
}

fn scan_output_tree(output_dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(output_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            let name = path.to_string_lossy();
            name.ends_with(".js") && !name.ends_with(".js.map")
        })
        .collect()
}

/// Locates the bundle `expo export` wrote under `output_dir`.
///
/// Tries the known layouts in order, then accepts a lone `.js` file anywhere
/// in the tree.
pub fn find_expo_bundle(output_dir: &Path, platform: Platform) -> Result<PathBuf> {
    let searched = expected_locations(platform);

    for relative in &searched {
        if let Some(found) = first_glob_match(output_dir, relative)? {
            log::debug!("Expo bundle matched {}: {}", relative, found.display());
            return Ok(found);
        }
    }

    let mut candidates = scan_output_tree(output_dir);
    match candidates.len() {
        0 => Err(Error::ExpoBundleNotFound {
            output_dir: output_dir.to_path_buf(),
            searched,
        }),
        1 => Ok(candidates.remove(0)),
        count => Err(Error::ExpoBundleAmbiguous {
            output_dir: output_dir.to_path_buf(),
            count,
            searched,
        }),
    }
}

impl ProjectBundler for ExpoBundler {
    async fn bundle<E: CommandExecutor>(
        &self,
        config: &ProjectConfig,
        options: &BundleOptions,
        executor: &E,
    ) -> Result<BundleResult> {
        let output_dir = prepare_output_dir(config, options).await?;

        let args = Self::command_args(config, options, &output_dir);
        log::info!("Exporting Expo bundle for {}", config.platform);
        executor.run(&config.project_dir, NPX, &args).await?;

        let search_dir = output_dir.clone();
        let platform = config.platform;
        let bundle_path =
            tokio::task::spawn_blocking(move || find_expo_bundle(&search_dir, platform))
                .await
                .context("Expo bundle search task failed")??;

        let map = with_suffix(&bundle_path, ".map");
        let sourcemap_path = map.is_file().then_some(map);

        log::info!("✓ Created bundle: {}", bundle_path.display());

        Ok(BundleResult {
            bundle_path,
            assets_dir: output_dir.join("assets"),
            sourcemap_path,
            output_dir,
            hermes_applied: false,
            project_kind: config.kind,
            platform: config.platform,
            bundle_sha256: String::new(),
        })
    }
}
