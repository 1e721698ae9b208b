use crate::history::History;
use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// Prompt printed before each read unless overridden by configuration.
pub const DEFAULT_PROMPT: &str = "minish > ";

/// Mutable, user-level view of the interpreter state.
///
/// One instance is created at startup and threaded by reference through the
/// loop, the dispatcher and every command; there is no ambient global
/// state. It contains:
/// - `vars`: environment variables passed to executed commands.
/// - `current_dir`: the working directory for command execution.
/// - `prompt`: the string printed before each read; written once by the
///   configuration loader before the loop starts, only read afterwards.
/// - `history`: the bounded ring of previously entered lines.
///
/// Note: fields are public for simplicity to keep the crate small.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, HOME).
    pub vars: HashMap<String, String>,
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// The prompt string written before each read.
    pub prompt: String,
    /// Previously entered raw command lines.
    pub history: History,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    ///
    /// Variables are copied from `std::env::vars()` and `current_dir` from
    /// `std::env::current_dir()`. The prompt starts as [`DEFAULT_PROMPT`]
    /// and the history starts empty.
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        for (k, v) in stdenv::vars() {
            vars.insert(k, v);
        }
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            vars,
            current_dir,
            prompt: DEFAULT_PROMPT.to_string(),
            history: History::new(),
        }
    }

    /// Get the value of an environment variable.
    ///
    /// Looks up the key in `self.vars` first, falling back to `std::env::var`.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .cloned()
            .or_else(|| stdenv::var(key).ok())
    }

    /// Set or override an environment variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_set_and_get_var() {
        let mut env = Environment::new();
        env.vars.clear();

        // initially absent
        assert_eq!(env.get_var("SOME_RANDOM_ENV_VAR_12345"), None);

        env.set_var("KEY", "VALUE");

        assert_eq!(env.get_var("KEY"), Some("VALUE".to_string()));
    }

    #[test]
    fn test_env_reads_from_process_env() {
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
    }

    #[test]
    fn test_env_starts_with_default_prompt_and_empty_history() {
        let env = Environment::new();
        assert_eq!(env.prompt, DEFAULT_PROMPT);
        assert!(env.history.is_empty());
    }
}
