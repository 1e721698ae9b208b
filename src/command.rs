use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// Signal returned by every executed command telling the interpreter loop
/// whether to keep reading or shut down.
///
/// This is the closed-set replacement for the shell convention of returning
/// a truthy/falsy integer from dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep prompting and executing commands.
    Continue,
    /// Terminate the interpreter loop cleanly.
    Exit,
}

impl Flow {
    pub fn should_continue(self) -> bool {
        matches!(self, Flow::Continue)
    }
}

/// Object-safe trait for any command the shell can execute.
///
/// Implemented by built-ins via a blanket impl and by the external-command
/// launcher. `stdout` receives regular command output, `stderr` receives
/// diagnostics; both are injected so tests can capture them.
pub trait ExecutableCommand {
    /// Executes the command, consuming it.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`; the
/// dispatcher queries factories in registration order and the first hit
/// wins. Implementations can use the environment to resolve executables
/// (e.g., using PATH).
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
