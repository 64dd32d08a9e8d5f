use crate::command::{CommandFactory, ExecutableCommand, Outcome};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::Result;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Command that is not a builtin.
///
/// The child runs with the dispatcher's own standard streams and the
/// dispatcher blocks until it terminates. The child's exit status is not
/// interpreted.
pub(crate) struct ExternalCommand {
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub(crate) fn new(name: OsString, args: Vec<OsString>) -> Self {
        Self { name, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    /// Accepts every name: external invocation is the fallback for anything
    /// the builtin factories did not claim, and failures surface at spawn
    /// time rather than through a pre-flight path check.
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        Some(Box::new(ExternalCommand::new(
            name.into(),
            args.iter().map(|a| a.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(self: Box<Self>, out: &mut dyn Write, _env: &mut Environment) -> Result<Outcome> {
        let waited = Command::new(&self.name)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .and_then(|mut child| child.wait());
        if waited.is_err() {
            // Missing binaries, permission errors and exec-format errors are
            // all reported the same way.
            writeln!(out, "{}: command not found", self.name.to_string_lossy())?;
        }
        Ok(Outcome::Continue)
    }
}

/// Resolve a command name the way `type` reports executables.
///
/// A name containing a path separator (absolute, or relative like
/// `bin/tool`) resolves directly when it names an existing regular file. A
/// bare name is searched through the `PATH`-style `search_paths` list and
/// the first regular file wins. An empty name never resolves.
pub(crate) fn resolve_executable(search_paths: &OsStr, name: &Path) -> Option<PathBuf> {
    if name.as_os_str().is_empty() {
        return None;
    }
    if name.is_absolute() || name.components().nth(1).is_some() {
        return is_regular_file(name).then(|| name.to_path_buf());
    }
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_regular_file(candidate))
}

fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
