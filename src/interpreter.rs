use crate::builtin::{Cd, Echo, Exit, Pwd, Type};
use crate::command::{CommandFactory, Outcome};
use crate::env::Environment;
use crate::external::ExternalCommand;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use std::marker::PhantomData;

/// Marker type that lets one generic [`CommandFactory`] impl cover every
/// command defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

/// The command dispatcher: a prompt loop over built-in and external commands.
///
/// The interpreter owns an [`Environment`] and an ordered table of
/// [`CommandFactory`] objects that are queried in turn to create a command by
/// name. See [`Default`] for the factories wired in out of the box.
///
/// Example
/// ```
/// use minishell::Interpreter;
/// use minishell::command::Outcome;
/// let mut sh = Interpreter::default();
/// let outcome = sh.run("echo", &["hello", "world"]).unwrap();
/// assert_eq!(outcome, Outcome::Continue);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
        }
    }

    /// Run a single command invocation by name with arguments, writing any
    /// output to the process stdout.
    ///
    /// Returns an error only when no factory recognizes the name, which is
    /// possible only with a custom factory set.
    pub fn run(&mut self, name: &str, args: &[&str]) -> Result<Outcome> {
        self.run_with_output(name, args, &mut std::io::stdout())
    }

    fn run_with_output(
        &mut self,
        name: &str,
        args: &[&str],
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(out, &mut self.env);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Dispatch one line of input: split it on runs of whitespace and run the
    /// first token as a command with the remaining tokens as arguments.
    ///
    /// An empty or all-whitespace line is a no-op.
    pub fn dispatch_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Outcome> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Outcome::Continue);
        };
        self.run_with_output(name, args, out)
    }

    /// The interactive read-dispatch loop.
    ///
    /// Prompts with `$ ` before every read. End-of-input terminates the loop
    /// cleanly; an interrupt discards the current line and prompts again.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        loop {
            match rl.readline("$ ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    let outcome = self.dispatch_line(&line, &mut std::io::stdout())?;
                    if outcome == Outcome::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    /// The builtin factories in registry order, with the external command
    /// launcher last so that dispatch is total.
    fn default() -> Self {
        Self::new(vec![
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<Echo>::default()),
            Box::new(Factory::<Type>::default()),
            Box::new(Factory::<Pwd>::default()),
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
