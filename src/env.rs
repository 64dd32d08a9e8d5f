use std::env as stdenv;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Single accessor for the process-wide state the shell depends on.
///
/// The working directory lives in the operating system, not in this struct:
/// reads and writes go straight through, so spawned children observe the same
/// directory without any plumbing, and `pwd` keeps its real failure path.
/// [`Environment::change_dir`] is the only write path and `cd` its only
/// caller.
#[derive(Debug, Default)]
pub struct Environment {}

impl Environment {
    pub fn new() -> Self {
        Self {}
    }

    /// Read the process working directory.
    pub fn current_dir(&self) -> io::Result<PathBuf> {
        stdenv::current_dir()
    }

    /// Change the process working directory.
    pub fn change_dir(&mut self, path: &Path) -> io::Result<()> {
        stdenv::set_current_dir(path)
    }

    /// The user's home directory, from `HOME`.
    pub fn home_dir(&self) -> Option<PathBuf> {
        stdenv::var_os("HOME").map(PathBuf::from)
    }

    /// Raw value of the executable search path (`PATH`), empty when unset.
    pub fn search_path(&self) -> OsString {
        stdenv::var_os("PATH").unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lock_current_dir;
    use std::fs;

    #[test]
    fn current_dir_matches_the_process() {
        let _lock = lock_current_dir();
        let env = Environment::new();
        assert_eq!(env.current_dir().unwrap(), stdenv::current_dir().unwrap());
    }

    #[test]
    fn search_path_is_present() {
        let env = Environment::new();
        assert!(!env.search_path().is_empty());
    }

    #[test]
    fn change_dir_moves_the_process() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let canonical = fs::canonicalize(temp.path()).unwrap();

        let mut env = Environment::new();
        env.change_dir(&canonical).unwrap();
        assert_eq!(env.current_dir().unwrap(), canonical);

        stdenv::set_current_dir(orig).unwrap();
    }
}
