//! Production [`CommandExecutor`] backed by `tokio::process`.

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::{Child, Command},
};

use super::CommandExecutor;
use crate::bundler::{Error, ErrorExt, Result};

/// Number of trailing stderr lines kept for error messages.
const STDERR_TAIL_LINES: usize = 20;

/// Grace period for a killed child to be reaped.
const KILL_GRACE: Duration = Duration::from_secs(10);

/// Runs programs as child processes, streaming their output line by line.
///
/// Bare program names are resolved on `PATH` with `which`; absolute paths are
/// used as-is. There is no timeout unless one is set with
/// [`with_timeout`](Self::with_timeout).
#[derive(Clone, Debug)]
pub struct ProcessExecutor {
    timeout: Option<Duration>,
    echo_output: bool,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self {
            timeout: None,
            echo_output: true,
        }
    }
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills any child still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sends child output to `log::debug!` instead of this process's stdout/stderr.
    pub fn quiet(mut self) -> Self {
        self.echo_output = false;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn resolve(program: &str) -> Result<PathBuf> {
        if program.trim().is_empty() {
            crate::bail!("cannot run an empty program name");
        }
        let candidate = Path::new(program);
        if candidate.is_absolute() || candidate.components().count() > 1 {
            return Ok(candidate.to_path_buf());
        }
        which::which(program).map_err(|e| Error::ToolNotFound {
            tool: program.to_string(),
            reason: e.to_string(),
        })
    }
}

impl CommandExecutor for ProcessExecutor {
    async fn run(&self, working_dir: &Path, program: &str, args: &[String]) -> Result<()> {
        let resolved = Self::resolve(program)?;
        log::debug!(
            "Running `{} {}` in {}",
            resolved.display(),
            args.join(" "),
            working_dir.display()
        );

        let mut command = Command::new(&resolved);
        command
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // npx and package managers fork node workers; a timeout must reach them too.
        #[cfg(unix)]
        {
            if self.timeout().is_some() {
                command.process_group(0);
            }
        }
        let mut child = command.spawn().fs_context("spawning", &resolved)?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let echo = self.echo_output;

        let outcome = {
            let run = async {
                let (_, tail) = tokio::join!(
                    async {
                        if let Some(stdout) = stdout {
                            let mut lines = BufReader::new(stdout).lines();
                            while let Ok(Some(line)) = lines.next_line().await {
                                if echo {
                                    println!("{}", line);
                                } else {
                                    log::debug!("[{}] {}", program, line);
                                }
                            }
                        }
                    },
                    async {
                        let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
                        if let Some(stderr) = stderr {
                            let mut lines = BufReader::new(stderr).lines();
                            while let Ok(Some(line)) = lines.next_line().await {
                                if echo {
                                    eprintln!("{}", line);
                                } else {
                                    log::debug!("[{}] {}", program, line);
                                }
                                if tail.len() == STDERR_TAIL_LINES {
                                    tail.pop_front();
                                }
                                tail.push_back(line);
                            }
                        }
                        tail
                    }
                );
                child.wait().await.map(|status| (status, tail))
            };

            match self.timeout() {
                Some(limit) => tokio::time::timeout(limit, run).await.ok(),
                None => Some(run.await),
            }
        };

        let (status, tail) = match outcome {
            Some(result) => result.fs_context("waiting for", &resolved)?,
            None => {
                let secs = self.timeout().map(|t| t.as_secs()).unwrap_or_default();
                log::warn!("`{}` timed out after {}s, terminating", program, secs);
                terminate(&mut child, program).await;
                return Err(Error::Timeout {
                    tool: program.to_string(),
                    secs,
                });
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                tool: program.to_string(),
                code: status.code(),
                stderr_tail: tail.into(),
            })
        }
    }
}

/// Kills the child and, on unix, every process in its group.
async fn terminate(child: &mut Child, program: &str) {
    #[cfg(unix)]
    {
        use nix::{
            sys::signal::{Signal, killpg},
            unistd::Pid,
        };
        if let Some(pid) = child.id().and_then(|pid| i32::try_from(pid).ok()) {
            if let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
                log::debug!("Failed to kill process group of `{}`: {}", program, e);
            }
        }
    }
    if let Err(e) = child.kill().await {
        log::warn!("Failed to kill `{}`: {}", program, e);
    }
    let _ = tokio::time::timeout(KILL_GRACE, child.wait()).await;
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_non_zero_exit_with_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessExecutor::new()
            .quiet()
            .run(
                dir.path(),
                "sh",
                &["-c".to_string(), "echo broken >&2; exit 3".to_string()],
            )
            .await
            .unwrap_err();
        match err {
            Error::ToolFailed {
                tool,
                code,
                stderr_tail,
            } => {
                assert_eq!(tool, "sh");
                assert_eq!(code, Some(3));
                assert_eq!(stderr_tail, vec!["broken".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unknown_program_is_tool_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessExecutor::new()
            .run(dir.path(), "definitely-not-a-real-tool-xyz", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }

    #[tokio::test]
    async fn empty_program_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessExecutor::new()
            .run(dir.path(), "", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GenericError(_)));
    }

    #[tokio::test]
    async fn timeout_kills_child() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessExecutor::new()
            .quiet()
            .with_timeout(Duration::from_millis(200))
            .run(dir.path(), "sleep", &["5".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[tokio::test]
    async fn timeout_kills_background_descendants() {
        let dir = tempfile::tempdir().unwrap();
        let executor = ProcessExecutor::new()
            .quiet()
            .with_timeout(Duration::from_millis(300));
        assert_eq!(executor.timeout(), Some(Duration::from_millis(300)));

        let err = executor
            .run(
                dir.path(),
                "sh",
                &[
                    "-c".to_string(),
                    "(sleep 1; touch late) & wait".to_string(),
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!dir.path().join("late").exists());
    }

    #[tokio::test]
    async fn runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        ProcessExecutor::new()
            .quiet()
            .run(
                dir.path(),
                "sh",
                &["-c".to_string(), "touch marker".to_string()],
            )
            .await
            .unwrap();
        assert!(dir.path().join("marker").exists());
    }
}
