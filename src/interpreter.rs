use crate::command::{CommandFactory, Flow};
use crate::env::Environment;
use crate::lexer;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — builtins and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interactive command interpreter.
///
/// Holds the [`Environment`] (prompt, working directory, history) and the
/// ordered list of [`CommandFactory`] objects queried to create commands by
/// name: builtins first, the external-command launcher last. Both are built
/// once at startup; nothing here is global.
///
/// [`Interpreter::execute_line`] covers one full split, record-history and
/// dispatch cycle and is the seam the tests drive; [`Interpreter::repl`]
/// wraps it with a line editor.
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with a custom set of command factories.
    pub fn new(env: Environment, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { env, commands }
    }

    /// Create an interpreter with the default factories:
    /// builtins `cd`, `help`, `exit`, `history`, then the external launcher.
    pub fn with_env(env: Environment) -> Self {
        use crate::builtin::{Cd, Exit, Help, History};
        use crate::external::ExternalCommand;
        Self::new(
            env,
            vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<History>::default()),
                Box::new(Factory::<ExternalCommand>::default()),
            ],
        )
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Factories are tried in registration order; the first that recognizes
    /// the name executes. A name no factory recognizes is reported on
    /// `stderr` and the loop continues.
    pub fn run(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(stdout, stderr, &mut self.env);
            }
        }
        writeln!(stderr, "minish: command not found: {name}")?;
        Ok(Flow::Continue)
    }

    /// Execute one raw input line: split, record history, dispatch.
    ///
    /// The raw pre-split line is recorded unless its first token is exactly
    /// `history`; blank lines produce neither a history entry nor a
    /// dispatch. Command errors are reported on `stderr` and never stop the
    /// loop.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Flow {
        let tokens = lexer::split_line(line);
        let Some((name, args)) = tokens.split_first() else {
            return Flow::Continue;
        };

        if name != "history" {
            self.env.history.push(line);
        }

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match self.run(name, &args, stdout, stderr) {
            Ok(flow) => flow,
            Err(e) => {
                let _ = writeln!(stderr, "minish: {e:#}");
                Flow::Continue
            }
        }
    }

    /// The interactive Read-Eval-Print Loop.
    ///
    /// Prompts with `env.prompt` before every read. End-of-input is a clean
    /// shutdown; Ctrl-C drops the line in progress and prompts again.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(&self.env.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    let flow =
                        self.execute_line(&line, &mut std::io::stdout(), &mut std::io::stderr());
                    if !flow.should_continue() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> Interpreter {
        Interpreter::with_env(Environment::new())
    }

    fn run_line(interp: &mut Interpreter, line: &str) -> (Flow, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let flow = interp.execute_line(line, &mut out, &mut err);
        (
            flow,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn blank_line_continues_without_dispatch_or_history() {
        let mut interp = interpreter();

        let (flow, out, err) = run_line(&mut interp, "   \t  ");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
        assert!(interp.env().history.is_empty());
    }

    #[test]
    fn exit_stops_the_loop_even_with_arguments() {
        let mut interp = interpreter();

        let (flow, _, _) = run_line(&mut interp, "exit");
        assert_eq!(flow, Flow::Exit);

        let (flow, _, _) = run_line(&mut interp, "exit 5 now");
        assert_eq!(flow, Flow::Exit);
    }

    #[test]
    fn unknown_command_is_reported_and_loop_continues() {
        let mut interp = interpreter();

        let (flow, out, err) = run_line(&mut interp, "definitely-not-a-real-command-xyz");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.contains("command not found: definitely-not-a-real-command-xyz"));
    }

    #[test]
    fn builtin_wins_over_external_lookup() {
        // `help` resolves to the builtin even though the dispatcher would
        // also try PATH.
        let mut interp = interpreter();

        let (flow, out, _) = run_line(&mut interp, "help");
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("The following are built in:"));
        assert!(out.contains("  cd\n"));
    }

    #[test]
    fn history_records_raw_lines_but_not_itself() {
        let mut interp = interpreter();

        run_line(&mut interp, "help");
        run_line(&mut interp, "exit  1");
        let (flow, out, _) = run_line(&mut interp, "history");
        assert_eq!(flow, Flow::Continue);

        // Raw pre-split lines, 1-based, in insertion order; the `history`
        // invocation itself is absent.
        assert_eq!(out, "1 help\n2 exit  1\n");
        assert_eq!(interp.env().history.len(), 2);
    }

    #[test]
    fn history_exclusion_matches_first_token_exactly() {
        let mut interp = interpreter();

        // `history` with arguments is still the history command.
        run_line(&mut interp, "history --whatever");
        assert!(interp.env().history.is_empty());

        // But a command merely starting with the word is recorded.
        run_line(&mut interp, "historyx");
        assert_eq!(interp.env().history.len(), 1);
    }

    #[test]
    fn dispatch_receives_arguments_after_the_command_name() {
        let mut interp = interpreter();

        // cd with two positionals trips argh's usage error, proving the
        // argument vector reached the builtin.
        let (flow, _, err) = run_line(&mut interp, "cd a b");
        assert_eq!(flow, Flow::Continue);
        assert!(!err.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn external_command_runs_and_loop_continues() {
        let _lock = crate::test_support::lock_current_dir();
        let mut interp = interpreter();

        // `true` exits 0, `false` exits 1; neither status reaches the loop.
        let (flow, _, err) = run_line(&mut interp, "true");
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());

        let (flow, _, err) = run_line(&mut interp, "false");
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());
    }
}
