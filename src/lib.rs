//! A minimal interactive shell built around a single dispatch loop.
//!
//! Each input line is trimmed, split on whitespace and dispatched: the first
//! token either names one of the built-in commands (`exit`, `echo`, `type`,
//! `pwd`, `cd`), which run in-process, or the whole token list is spawned as
//! an external command with inherited standard streams. There is no quoting,
//! no pipelines, no redirection and no job control.
//!
//! The main entry point is [`Interpreter`], which executes commands by name
//! with arguments using a set of pluggable factories. The public modules
//! [`command`] and [`env`] expose the traits and types for implementing your
//! own commands and for interacting with the process environment.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;

pub use interpreter::Interpreter;
