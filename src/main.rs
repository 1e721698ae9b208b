use argh::FromArgs;
use minish::{config, Environment, Interpreter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(FromArgs)]
/// A minimal interactive shell.
struct Options {
    /// path to the configuration file
    #[argh(
        option,
        default = "PathBuf::from(config::DEFAULT_CONFIG_FILE)"
    )]
    config: PathBuf,
}

fn main() -> ExitCode {
    let options: Options = argh::from_env();

    let mut env = Environment::new();
    if let Err(e) = config::load(&options.config, &mut env) {
        // Missing configuration is reported but never fatal.
        eprintln!("minish: {e:#}");
    }

    let mut interpreter = Interpreter::with_env(env);
    if let Err(e) = interpreter.repl() {
        eprintln!("minish: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
