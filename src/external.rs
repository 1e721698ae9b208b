use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;

/// Command that is not a builtin: an external program resolved through PATH
/// and run as a child process.
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: OsString, args: Vec<OsString>) -> Self {
        Self { program, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let search_paths = env.get_var("PATH").unwrap_or_default();
        let executable = find_command_path(OsStr::new(&search_paths), Path::new(name))?;
        Some(Box::new(ExternalCommand::new(
            executable.as_os_str().to_owned(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Spawn the program and block until it has exited or been killed by a
    /// signal. Stopped (not terminated) children keep the wait going.
    ///
    /// The child inherits the interpreter's stdio. Its exit status is
    /// consumed and discarded: a failing program never stops the loop.
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Flow> {
        let spawned = std::process::Command::new(&self.program)
            .args(&self.args)
            .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&env.current_dir)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                writeln!(stderr, "minish: {}: {}", self.program.to_string_lossy(), e)?;
                return Ok(Flow::Continue);
            }
        };

        child
            .wait()
            .with_context(|| format!("wait for {}", self.program.to_string_lossy()))?;
        Ok(Flow::Continue)
    }
}

/// Resolve a command path the way a typical shell would.
///
/// Behavior:
/// - Empty name: `None`.
/// - Absolute path: returned if it exists.
/// - Any explicit path (`./foo`, `bin/sh`): checked relative to the current
///   directory, never searched through PATH.
/// - Bare name: each directory in `search_paths` is tried in order and the
///   first existing match wins.
///
/// Returns a borrowed path when the input already names the file and an
/// owned `PathBuf` when the result comes from a PATH lookup.
pub fn find_command_path<'a>(search_paths: &OsStr, program: &'a Path) -> Option<Cow<'a, Path>> {
    if program.as_os_str().is_empty() {
        return None;
    }

    let explicit = program.is_absolute()
        || program.starts_with("./")
        || program.components().nth(1).is_some();
    if explicit {
        return program.exists().then_some(Cow::Borrowed(program));
    }

    std::env::split_paths(search_paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.exists())
        .map(Cow::Owned)
}
