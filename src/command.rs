use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// What the dispatch loop should do after a command has run.
///
/// Diagnostics a command prints (usage errors, lookup failures, spawn
/// failures) are non-fatal and yield [`Outcome::Continue`]; only the `exit`
/// builtin produces [`Outcome::Exit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading input.
    Continue,
    /// Terminate the dispatch loop; the process exits with code 0.
    Exit,
}

/// Object-safe trait for any command the dispatcher can run.
///
/// Built-ins write their output and diagnostics to `out`. External commands
/// inherit the real standard streams and use `out` only for the spawn
/// failure diagnostic.
pub trait ExecutableCommand {
    /// Executes the command.
    fn execute(self: Box<Self>, out: &mut dyn Write, env: &mut Environment) -> Result<Outcome>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`, letting the
/// dispatcher fall through to the next factory in its table.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
