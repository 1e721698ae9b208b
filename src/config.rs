//! Configuration loading: `key=value` lines applied to the environment
//! before the interpreter loop starts.

use crate::env::Environment;
use crate::lexer::trim_quotes;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Configuration file looked up in the working directory unless overridden
/// on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "minish.conf";

/// Apply settings from a config file to the environment.
///
/// Each line is whitespace/quote-trimmed; blank lines and lines starting
/// with `#` are skipped. The rest are `key=value` pairs: the key is the
/// text before the first `=`, the value the text between the first and
/// second (anything after a second `=` is ignored). The only recognized key
/// is `prompt`; unknown keys are ignored.
///
/// A missing or unreadable file is an error for the caller to report; the
/// interpreter proceeds with defaults either way.
pub fn load(path: &Path, env: &mut Environment) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("can't open config file {}", path.display()))?;

    for line in BufReader::new(file).lines() {
        let line =
            line.with_context(|| format!("can't read config file {}", path.display()))?;
        apply_line(&line, env);
    }
    Ok(())
}

fn apply_line(line: &str, env: &mut Environment) {
    let trimmed = trim_quotes(line);
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return;
    }

    let mut parts = trimmed.split('=');
    let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
        return;
    };

    if trim_quotes(key) == "prompt" {
        env.prompt = trim_quotes(value).to_string();
    }
}
