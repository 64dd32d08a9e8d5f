use crate::command::{CommandFactory, ExecutableCommand, Outcome};
use crate::env::Environment;
use crate::external::resolve_executable;
use crate::interpreter::Factory;
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Names recognized as built-in commands. Fixed for the process lifetime and
/// consulted by `type` before any path search, so a builtin name shadows a
/// same-named external binary.
pub(crate) const BUILTIN_NAMES: [&str; 5] = ["exit", "echo", "type", "pwd", "cd"];

/// Built-in commands known to the shell at compile time.
///
/// Builtins capture their raw argument tokens and are executed directly
/// in-process without spawning a child process. There are no flag semantics;
/// usage errors are reported on the output stream and never abort the loop.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name() -> &'static str;

    /// Capture the tokens following the command name.
    fn from_args(args: &[&str]) -> Self;

    /// Executes the command using the provided output stream and environment.
    fn execute(self, out: &mut dyn Write, env: &mut Environment) -> Result<Outcome>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, out: &mut dyn Write, env: &mut Environment) -> Result<Outcome> {
        T::execute(*self, out, env)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(Box::new(T::from_args(args)))
        } else {
            None
        }
    }
}

/// Terminate the dispatch loop.
///
/// Accepts no arguments or the single argument `0`; anything else is invalid
/// usage and the loop keeps running.
pub(crate) struct Exit {
    args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn from_args(args: &[&str]) -> Self {
        Self {
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn execute(self, out: &mut dyn Write, _env: &mut Environment) -> Result<Outcome> {
        match self.args.as_slice() {
            [] => Ok(Outcome::Exit),
            [code] if code == "0" => Ok(Outcome::Exit),
            _ => {
                writeln!(out, "Invalid usage of exit. Use 'exit' or 'exit 0'.")?;
                Ok(Outcome::Continue)
            }
        }
    }
}

/// Write the arguments to the output stream, separated by single spaces,
/// followed by a newline.
pub(crate) struct Echo {
    args: Vec<String>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn from_args(args: &[&str]) -> Self {
        Self {
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn execute(self, out: &mut dyn Write, _env: &mut Environment) -> Result<Outcome> {
        writeln!(out, "{}", self.args.join(" "))?;
        Ok(Outcome::Continue)
    }
}

/// Report whether a name is a shell builtin or an executable on the search
/// path. Extra arguments beyond the first are ignored.
pub(crate) struct Type {
    name: Option<String>,
}

impl BuiltinCommand for Type {
    fn name() -> &'static str {
        "type"
    }

    fn from_args(args: &[&str]) -> Self {
        Self {
            name: args.first().map(|a| a.to_string()),
        }
    }

    fn execute(self, out: &mut dyn Write, env: &mut Environment) -> Result<Outcome> {
        let Some(name) = self.name else {
            writeln!(out, "type: usage: type command_name")?;
            return Ok(Outcome::Continue);
        };
        if BUILTIN_NAMES.contains(&name.as_str()) {
            writeln!(out, "{name} is a shell builtin")?;
        } else if let Some(path) = resolve_executable(&env.search_path(), Path::new(&name)) {
            writeln!(out, "{name} is {}", path.display())?;
        } else {
            writeln!(out, "{name}: not found")?;
        }
        Ok(Outcome::Continue)
    }
}

/// Print the current working directory.
pub(crate) struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn from_args(_args: &[&str]) -> Self {
        Self {}
    }

    fn execute(self, out: &mut dyn Write, env: &mut Environment) -> Result<Outcome> {
        match env.current_dir() {
            Ok(dir) => writeln!(out, "{}", dir.display())?,
            Err(err) => writeln!(out, "pwd: {err}")?,
        }
        Ok(Outcome::Continue)
    }
}

/// Change the current working directory.
///
/// The exact token `~` resolves to the user's home directory; a relative
/// target resolves against the current working directory. Every change
/// failure is reported with the same "No such file or directory" diagnostic,
/// whatever the underlying error was.
pub(crate) struct Cd {
    target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn from_args(args: &[&str]) -> Self {
        Self {
            target: args.first().map(|a| a.to_string()),
        }
    }

    fn execute(self, out: &mut dyn Write, env: &mut Environment) -> Result<Outcome> {
        let Some(target) = self.target else {
            writeln!(out, "cd: usage: cd <path>")?;
            return Ok(Outcome::Continue);
        };

        let target = if target == "~" {
            match env.home_dir() {
                Some(home) => home,
                None => {
                    writeln!(out, "cd: failed to get home directory: HOME is not set")?;
                    return Ok(Outcome::Continue);
                }
            }
        } else {
            PathBuf::from(target)
        };

        let resolved = if target.is_absolute() {
            target
        } else {
            env.current_dir().unwrap_or_default().join(target)
        };

        if env.change_dir(&resolved).is_err() {
            writeln!(out, "cd: {}: No such file or directory", resolved.display())?;
        }
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lock_current_dir;
    use std::env as stdenv;
    use std::fs;

    fn run<T: BuiltinCommand>(args: &[&str]) -> (Outcome, String) {
        let mut env = Environment::new();
        let mut out = Vec::new();
        let outcome = T::from_args(args).execute(&mut out, &mut env).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn echo_joins_arguments_with_single_spaces() {
        let (outcome, out) = run::<Echo>(&["hello", "world"]);
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(out, "hello world\n");
    }

    #[test]
    fn echo_without_arguments_prints_an_empty_line() {
        let (_, out) = run::<Echo>(&[]);
        assert_eq!(out, "\n");
    }

    #[test]
    fn exit_without_arguments_terminates() {
        let (outcome, out) = run::<Exit>(&[]);
        assert_eq!(outcome, Outcome::Exit);
        assert!(out.is_empty());
    }

    #[test]
    fn exit_zero_terminates() {
        let (outcome, out) = run::<Exit>(&["0"]);
        assert_eq!(outcome, Outcome::Exit);
        assert!(out.is_empty());
    }

    #[test]
    fn exit_with_any_other_argument_keeps_running() {
        for args in [&["1"][..], &["abc"][..], &["0", "0"][..]] {
            let (outcome, out) = run::<Exit>(args);
            assert_eq!(outcome, Outcome::Continue);
            assert_eq!(out, "Invalid usage of exit. Use 'exit' or 'exit 0'.\n");
        }
    }

    #[test]
    fn type_reports_every_builtin_name() {
        for name in BUILTIN_NAMES {
            let (_, out) = run::<Type>(&[name]);
            assert_eq!(out, format!("{name} is a shell builtin\n"));
        }
    }

    #[test]
    fn type_without_arguments_prints_usage() {
        let (outcome, out) = run::<Type>(&[]);
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(out, "type: usage: type command_name\n");
    }

    #[test]
    fn type_reports_unknown_names_as_not_found() {
        let (_, out) = run::<Type>(&["definitely-not-a-command-12345"]);
        assert_eq!(out, "definitely-not-a-command-12345: not found\n");
    }

    #[test]
    #[cfg(unix)]
    fn type_resolves_executables_on_the_search_path() {
        let (_, out) = run::<Type>(&["sh"]);
        assert!(out.starts_with("sh is "), "unexpected output: {out}");
        assert!(out.trim_end().ends_with("/sh"), "unexpected output: {out}");
    }

    #[test]
    fn pwd_prints_the_current_directory() {
        let _lock = lock_current_dir();
        let (outcome, out) = run::<Pwd>(&[]);
        assert_eq!(outcome, Outcome::Continue);
        let expected = format!("{}\n", stdenv::current_dir().unwrap().display());
        assert_eq!(out, expected);
    }

    #[test]
    fn cd_without_arguments_prints_usage() {
        let (outcome, out) = run::<Cd>(&[]);
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(out, "cd: usage: cd <path>\n");
    }

    #[test]
    fn cd_to_absolute_path_changes_the_directory() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let canonical = fs::canonicalize(temp.path()).unwrap();

        let (outcome, out) = run::<Cd>(&[&canonical.to_string_lossy()]);
        assert_eq!(outcome, Outcome::Continue);
        assert!(out.is_empty());
        assert_eq!(stdenv::current_dir().unwrap(), canonical);

        stdenv::set_current_dir(orig).unwrap();
    }

    #[test]
    fn cd_resolves_relative_targets_against_the_current_directory() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let canonical = fs::canonicalize(temp.path()).unwrap();
        fs::create_dir(canonical.join("sub")).unwrap();
        stdenv::set_current_dir(&canonical).unwrap();

        let (_, out) = run::<Cd>(&["sub"]);
        assert!(out.is_empty());
        assert_eq!(stdenv::current_dir().unwrap(), canonical.join("sub"));

        // pwd after a relative cd prints the absolute resolved path.
        let (_, out) = run::<Pwd>(&[]);
        assert_eq!(out, format!("{}\n", canonical.join("sub").display()));

        stdenv::set_current_dir(orig).unwrap();
    }

    #[test]
    fn cd_to_missing_absolute_path_reports_and_stays_put() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let (outcome, out) = run::<Cd>(&["/nonexistent-path-xyz"]);
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(out, "cd: /nonexistent-path-xyz: No such file or directory\n");
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn cd_to_missing_relative_path_reports_the_resolved_path() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let canonical = fs::canonicalize(temp.path()).unwrap();
        stdenv::set_current_dir(&canonical).unwrap();

        let (_, out) = run::<Cd>(&["missing-sub"]);
        let expected = format!(
            "cd: {}: No such file or directory\n",
            canonical.join("missing-sub").display()
        );
        assert_eq!(out, expected);
        assert_eq!(stdenv::current_dir().unwrap(), canonical);

        stdenv::set_current_dir(orig).unwrap();
    }

    #[test]
    fn cd_tilde_changes_to_the_home_directory() {
        let _lock = lock_current_dir();
        let Some(home) = Environment::new().home_dir() else {
            return;
        };
        if fs::canonicalize(&home).is_err() {
            return;
        }
        let orig = stdenv::current_dir().unwrap();

        let (outcome, out) = run::<Cd>(&["~"]);
        assert_eq!(outcome, Outcome::Continue);
        assert!(out.is_empty());
        assert_eq!(
            fs::canonicalize(stdenv::current_dir().unwrap()).unwrap(),
            fs::canonicalize(&home).unwrap()
        );

        stdenv::set_current_dir(orig).unwrap();
    }
}
