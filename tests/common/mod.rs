//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use codepush_bundler::bundler::{CommandExecutor, Error, Result, detect::hermesc_candidates};

/// One recorded external tool invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub working_dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

impl Call {
    /// `program` file name, without directories.
    pub fn tool(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The tool plus its first argument, e.g. `npx react-native` or `yarn install`.
    pub fn describe(&self) -> String {
        match self.args.first() {
            Some(first) => format!("{} {}", self.tool(), first),
            None => self.tool(),
        }
    }
}

/// Fake executor that records invocations and writes the files each tool
/// would have produced.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<Call>>,
    failing: HashSet<String>,
    silent: HashSet<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes invocations matching `name` exit non-zero. `name` is compared
    /// against both [`Call::tool`] and [`Call::describe`].
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Makes invocations matching `name` succeed without writing any output.
    pub fn silent(mut self, name: &str) -> Self {
        self.silent.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn described_calls(&self) -> Vec<String> {
        self.calls().iter().map(Call::describe).collect()
    }

    fn matches(set: &HashSet<String>, call: &Call) -> bool {
        set.contains(&call.tool()) || set.contains(&call.describe())
    }
}

fn arg_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn write(path: impl AsRef<Path>, contents: &str) {
    let path = path.as_ref();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

impl CommandExecutor for RecordingExecutor {
    async fn run(&self, working_dir: &Path, program: &str, args: &[String]) -> Result<()> {
        let call = Call {
            working_dir: working_dir.to_path_buf(),
            program: program.to_string(),
            args: args.to_vec(),
        };
        self.calls.lock().unwrap().push(call.clone());

        if Self::matches(&self.failing, &call) {
            return Err(Error::ToolFailed {
                tool: call.tool(),
                code: Some(1),
                stderr_tail: vec!["simulated failure".to_string()],
            });
        }
        if Self::matches(&self.silent, &call) {
            return Ok(());
        }

        match call.describe().as_str() {
            "npx react-native" => {
                if let Some(bundle) = arg_after(args, "--bundle-output") {
                    write(bundle, "var app = 'javascript';");
                }
                if let Some(map) = arg_after(args, "--sourcemap-output") {
                    write(map, r#"{"version":3,"sources":["index.js"]}"#);
                }
            }
            "npx expo" => {
                let output = PathBuf::from(arg_after(args, "--output-dir").unwrap());
                let platform = arg_after(args, "--platform").unwrap();
                let bundle = format!("_expo/static/js/{}/index-3f2a1b.js", platform);
                write(output.join(bundle), "var app = 'expo';");
                write(output.join("metadata.json"), "{}");
            }
            _ if call.tool() == "node" => {
                if let Some(out) = arg_after(args, "-o") {
                    write(out, r#"{"version":3,"composed":true}"#);
                }
            }
            _ if call.tool().starts_with("hermesc") => {
                let out = arg_after(args, "-out").unwrap();
                write(out, "HBC-bytecode");
                if args.iter().any(|a| a == "-output-source-map") {
                    write(format!("{}.map", out), r#"{"version":3,"hermes":true}"#);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Writes a project tree from `(relative path, contents)` pairs.
pub fn project(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (relative, contents) in files {
        write(dir.path().join(relative), contents);
    }
    dir
}

/// `package.json` for a bare React Native app at `version`.
pub fn react_native_package(version: &str) -> String {
    format!(
        r#"{{"name": "app", "main": "index.js", "dependencies": {{"react": "18.2.0", "react-native": "{}"}}}}"#,
        version
    )
}

/// Puts a (fake) `hermesc` where detection looks for it.
pub fn install_hermesc(project_dir: &Path) -> PathBuf {
    let path = hermesc_candidates(project_dir).remove(1);
    write(&path, "#!/bin/sh\n");
    path
}

/// Puts react-native's source-map composition script into `node_modules`.
pub fn install_compose_script(project_dir: &Path) -> PathBuf {
    let path = project_dir.join("node_modules/react-native/scripts/compose-source-maps.js");
    write(&path, "// compose");
    path
}
