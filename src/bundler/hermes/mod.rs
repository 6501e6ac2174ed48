//! Hermes byte-code compilation.
//!
//! Compiles a JavaScript bundle with `hermesc` and swaps the byte-code in at
//! the bundle's original path, so consumers see the same filename whether or
//! not Hermes ran. When a source map was requested, the Hermes map is
//! reconciled with the bundler's map (see [`sourcemap`]).

pub mod sourcemap;

use std::path::Path;

use crate::bundler::{
    Context, Error, Result,
    exec::{CommandExecutor, Reporter},
    utils::fs::{replace_file, with_suffix},
};

pub use sourcemap::{ComposeOutcome, compose_source_maps, find_compose_script};

/// What happened during [`compile`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CompileReport {
    /// Source-map branch taken; `None` if no map was requested or produced.
    pub source_map: Option<ComposeOutcome>,
}

/// Builds the `hermesc` argument list.
pub fn hermesc_args(bundle_path: &Path, hbc_path: &Path, sourcemap: bool) -> Vec<String> {
    let mut args = vec![
        "-emit-binary".to_string(),
        "-out".to_string(),
        hbc_path.to_string_lossy().into_owned(),
    ];
    if sourcemap {
        args.push("-output-source-map".to_string());
    }
    args.push(bundle_path.to_string_lossy().into_owned());
    args
}

/// Compiles `bundle_path` to Hermes byte-code in place.
///
/// # Process
///
/// 1. Check that `hermesc` and the bundle exist
/// 2. Run `hermesc -emit-binary -out <bundle>.hbc [-output-source-map] <bundle>`
/// 3. Rename `<bundle>.hbc` over `<bundle>`
/// 4. If `sourcemap_path` is set and `<bundle>.hbc.map` was produced, compose the maps
///
/// Source-map problems are reported as warnings and never fail the compile.
pub async fn compile<E: CommandExecutor>(
    executor: &E,
    reporter: &dyn Reporter,
    hermesc_path: &Path,
    bundle_path: &Path,
    sourcemap_path: Option<&Path>,
) -> Result<CompileReport> {
    if !hermesc_path.is_file() {
        return Err(Error::HermescMissing(hermesc_path.to_path_buf()));
    }
    if !bundle_path.is_file() {
        return Err(Error::BundleMissing(bundle_path.to_path_buf()));
    }

    let bundle_dir = bundle_path
        .parent()
        .with_context(|| format!("bundle path has no parent: {}", bundle_path.display()))?
        .to_path_buf();
    let hbc_path = with_suffix(bundle_path, ".hbc");
    let args = hermesc_args(bundle_path, &hbc_path, sourcemap_path.is_some());

    reporter.step("Compiling bundle to Hermes byte-code");
    executor
        .run(&bundle_dir, &hermesc_path.to_string_lossy(), &args)
        .await?;

    replace_file(&hbc_path, bundle_path).await?;
    log::info!("✓ Hermes byte-code written to {}", bundle_path.display());

    let mut report = CompileReport::default();
    if let Some(original_map) = sourcemap_path {
        let hermes_map = with_suffix(&hbc_path, ".map");
        if hermes_map.is_file() {
            match compose_source_maps(executor, reporter, &bundle_dir, original_map, &hermes_map)
                .await
            {
                Ok(outcome) => report.source_map = Some(outcome),
                Err(e) => reporter.warn(&format!("Could not finalize source map: {}", e)),
            }
        } else {
            reporter.warn(&format!(
                "hermesc produced no source map at {}",
                hermes_map.display()
            ));
        }
    }

    Ok(report)
}
