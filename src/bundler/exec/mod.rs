//! Subprocess and progress-reporting seams.
//!
//! Every external tool the pipeline drives (package managers, `npx`, `node`,
//! `hermesc`) is launched through [`CommandExecutor`]. Tests substitute a
//! recording implementation; production uses [`ProcessExecutor`].

mod process;
mod report;

use std::{future::Future, path::Path};

use crate::bundler::Result;

pub use process::ProcessExecutor;
pub use report::{LogReporter, Reporter, SilentReporter};

/// Launches an external program and waits for it to exit.
pub trait CommandExecutor: Send + Sync {
    /// Runs `program` with `args` in `working_dir`.
    ///
    /// Returns `Ok(())` only when the program exited with status zero.
    fn run(
        &self,
        working_dir: &Path,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<()>> + Send;
}
