use anyhow::Result;
use argh::FromArgs;
use minishell::Interpreter;

/// A minimal interactive shell: exit, echo, type, pwd and cd run in-process,
/// everything else is spawned as an external command.
#[derive(FromArgs)]
struct Options {}

fn main() -> Result<()> {
    let Options {} = argh::from_env();
    Interpreter::default().repl()
}
