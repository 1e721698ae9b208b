//! A small interactive command interpreter.
//!
//! This crate provides the building blocks of a minimal shell: a line
//! splitter and quote trimmer, a bounded history of entered lines, a set of
//! built-in commands executed in-process, and a launcher that resolves and
//! spawns external programs, waiting for each to finish. It is intentionally
//! small and easy to read.
//!
//! The main entry point is [`Interpreter`], which dispatches parsed command
//! lines to builtins or external programs through a set of pluggable
//! factories. The public modules [`command`], [`env`] and [`history`] expose
//! the traits and types for implementing your own commands and for
//! inspecting interpreter state.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
mod external;
pub mod history;
mod interpreter;
pub mod lexer;

pub use command::Flow;
pub use env::Environment;
pub use interpreter::Interpreter;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Serializes tests that read or change the process working directory.
    pub fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX.get_or_init(|| Mutex::new(())).lock().unwrap()
    }
}
