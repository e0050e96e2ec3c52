//! Invocation of external command line tools.
//!
//! All image and PDF work is delegated to external programs. This module
//! holds the pieces shared by every tool:
//!
//! - [`ToolCommand`]: a program plus its argument list, built by pure
//!   functions so the exact arguments can be unit tested
//! - [`CommandRunner`]: the seam that executes commands; [`ProcessRunner`]
//!   spawns real processes with `tokio::process`
//! - [`check_dependencies`]: verifies up front that every required
//!   executable is on `$PATH`

use std::ffi::OsStr;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::error::{Result, ScanError};
use crate::output::OutputFormatter;

/// A program and the arguments it is invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    /// Start a command for `program` without arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_string()));
        self
    }

    /// Run the command inside `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, without the program name.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The working directory, if one was set.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Program name followed by all arguments.
    pub fn to_vec(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    fn to_tokio(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_vec().join(" "))
    }
}

/// Executes [`ToolCommand`]s.
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion with inherited stdout/stderr.
    ///
    /// A non-zero exit status is an error.
    fn run(&self, command: &ToolCommand) -> impl Future<Output = Result<()>> + Send;

    /// Run a command and capture its stdout as text.
    ///
    /// A non-zero exit status is an error.
    fn output(&self, command: &ToolCommand) -> impl Future<Output = Result<String>> + Send;
}

/// Runs commands as child processes.
///
/// Commands are echoed through the [`OutputFormatter`] in verbose mode. In
/// dry-run mode, commands passed to [`CommandRunner::run`] are only echoed;
/// probes through [`CommandRunner::output`] still execute since they do not
/// modify any file.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    formatter: OutputFormatter,
    dry_run: bool,
}

impl ProcessRunner {
    /// Create a runner that reports through `formatter`.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            formatter,
            dry_run: false,
        }
    }

    /// Only print the commands that would modify files.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The formatter commands are echoed through.
    pub fn formatter(&self) -> &OutputFormatter {
        &self.formatter
    }

    fn not_started(command: &ToolCommand, source: std::io::Error) -> ScanError {
        ScanError::ToolNotStarted {
            command: command.to_string(),
            source,
        }
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        if self.dry_run {
            self.formatter.plain(&self.formatter.render_command(&command.to_vec()));
            return Ok(());
        }

        self.formatter.command(&command.to_vec());

        let status = command
            .to_tokio()
            .status()
            .await
            .map_err(|err| Self::not_started(command, err))?;

        if !status.success() {
            return Err(ScanError::ToolFailed {
                command: command.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }

    async fn output(&self, command: &ToolCommand) -> Result<String> {
        self.formatter.command(&command.to_vec());

        let output = command
            .to_tokio()
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|err| Self::not_started(command, err))?;

        if !output.status.success() {
            return Err(ScanError::ToolFailed {
                command: command.to_string(),
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// An external executable a tool depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// Name of the executable, e.g. `pdfimages`.
    pub executable: &'static str,
    /// Package providing it, e.g. `poppler`, shown in the error message.
    pub package: Option<&'static str>,
}

impl Dependency {
    /// An executable without a package hint.
    pub const fn bin(executable: &'static str) -> Self {
        Self {
            executable,
            package: None,
        }
    }

    /// An executable provided by `package`.
    pub const fn from_package(executable: &'static str, package: &'static str) -> Self {
        Self {
            executable,
            package: Some(package),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.package {
            Some(package) => write!(f, "{} ({})", self.executable, package),
            None => f.write_str(self.executable),
        }
    }
}

/// Check that every dependency is on `$PATH`.
///
/// # Errors
///
/// Returns a single [`ScanError::MissingDependencies`] naming every missing
/// executable, not only the first one.
pub fn check_dependencies(dependencies: &[Dependency]) -> Result<()> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    let missing = missing_dependencies(dependencies, &path_var);

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScanError::MissingDependencies { missing })
    }
}

/// Dependencies not found in the directories of `path_var`, rendered for
/// display.
pub fn missing_dependencies(dependencies: &[Dependency], path_var: &OsStr) -> Vec<String> {
    dependencies
        .iter()
        .filter(|dep| find_executable_in(dep.executable, path_var).is_none())
        .map(|dep| dep.to_string())
        .collect()
}

/// Locate `name` on `$PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    find_executable_in(name, &path_var)
}

fn find_executable_in(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// The ImageMagick convert command.
///
/// ImageMagick 7 introduced the top level `magick` command; use it when
/// present.
pub fn convert_executable() -> ToolCommand {
    convert_executable_for(find_executable("magick").is_some())
}

/// The convert command depending on whether `magick` is available.
pub fn convert_executable_for(has_magick: bool) -> ToolCommand {
    if has_magick {
        ToolCommand::new("magick").arg("convert")
    } else {
        ToolCommand::new("convert")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A runner that records commands instead of executing them.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Records every command; `output` answers from a queue of canned
    /// responses keyed by program name.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        commands: Mutex<Vec<ToolCommand>>,
        responses: Mutex<Vec<(String, VecDeque<String>)>>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue `response` for the next `output` call of `program`.
        pub fn respond(&self, program: &str, response: &str) {
            let mut responses = self.responses.lock().unwrap();
            match responses.iter_mut().find(|(p, _)| p == program) {
                Some((_, queue)) => queue.push_back(response.to_string()),
                None => responses.push((
                    program.to_string(),
                    VecDeque::from([response.to_string()]),
                )),
            }
        }

        pub fn commands(&self) -> Vec<ToolCommand> {
            self.commands.lock().unwrap().clone()
        }

        pub fn command_lines(&self) -> Vec<String> {
            self.commands().iter().map(|c| c.to_string()).collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, command: &ToolCommand) -> Result<()> {
            self.commands.lock().unwrap().push(command.clone());
            Ok(())
        }

        async fn output(&self, command: &ToolCommand) -> Result<String> {
            self.commands.lock().unwrap().push(command.clone());
            let mut responses = self.responses.lock().unwrap();
            responses
                .iter_mut()
                .find(|(p, _)| p == command.program())
                .and_then(|(_, queue)| queue.pop_front())
                .ok_or_else(|| ScanError::other(format!("no canned output for {command}")))
        }
    }
}
