//! Colored terminal output.
//!
//! Progress goes to stderr so that stdout carries only the result (the JSON
//! document with `--json`).

use console::{Term, style};

use crate::bundler::{BundleResult, Reporter};

/// Terminal reporter with verbosity control.
#[derive(Clone, Debug)]
pub struct OutputManager {
    term: Term,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager writing to stderr.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            verbose,
            quiet,
        }
    }

    /// Print verbose message if in verbose mode
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if self.verbose && !self.quiet {
            self.term
                .write_line(&format!("  {}", style(message).dim()))?;
        }
        Ok(())
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term
            .write_line(&format!("{} {}", style("==>").cyan().bold(), style(title).bold()))
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&format!("  {}", message))
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term
            .write_line(&format!("{} {}", style("✓").green().bold(), message))
    }

    /// Print warning message; shown even in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.term.write_line(&format!(
            "{} {}",
            style("warning:").yellow().bold(),
            message
        ))
    }

    /// Print error message with optional suggestions
    pub fn error(&self, message: &str, suggestions: &[String]) -> std::io::Result<()> {
        self.term
            .write_line(&format!("{} {}", style("error:").red().bold(), message))?;
        for suggestion in suggestions {
            self.term
                .write_line(&format!("  {} {}", style("hint:").cyan(), suggestion))?;
        }
        Ok(())
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&format!("    {}", message))
    }

    /// Print the human summary of a finished run.
    pub fn summary(&self, result: &BundleResult) -> std::io::Result<()> {
        self.success(&format!(
            "Bundled {} project for {}",
            result.project_kind, result.platform
        ))?;
        self.verbose(&format!("output:    {}", result.output_dir.display()))?;
        self.indent(&format!("bundle:    {}", result.bundle_path.display()))?;
        self.indent(&format!("assets:    {}", result.assets_dir.display()))?;
        if let Some(map) = &result.sourcemap_path {
            self.indent(&format!("sourcemap: {}", map.display()))?;
        }
        self.indent(&format!(
            "hermes:    {}",
            if result.hermes_applied { "yes" } else { "no" }
        ))?;
        self.indent(&format!("sha256:    {}", result.bundle_sha256))
    }
}

impl Reporter for OutputManager {
    fn step(&self, message: &str) {
        let _ = self.section(message);
    }

    fn info(&self, message: &str) {
        let _ = self.progress(message);
    }

    fn warn(&self, message: &str) {
        let _ = OutputManager::warn(self, message);
    }
}
