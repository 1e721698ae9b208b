//! Lexical analysis for the shell: splitting a raw line into tokens and
//! trimming whitespace/quotes off configuration values.

/// Characters that delimit tokens in a command line.
///
/// The classic token delimiter set: space, tab, carriage return, newline
/// and the bell character.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Split a raw command line into whitespace-delimited tokens.
///
/// Repeated delimiters collapse, so a line of pure whitespace produces an
/// empty vector. The first token, if present, is the command name.
///
/// Splitting is deliberately quote-unaware: `cd "my dir"` produces three
/// tokens (`cd`, `"my`, `dir"`). Quote handling exists only in
/// [`trim_quotes`], which the configuration loader uses; the two are not
/// consistent with each other and that behavior is pinned by tests.
pub fn split_line(line: &str) -> Vec<String> {
    line.split(&DELIMITERS[..])
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Trim surrounding whitespace and a single pair of matching outer quotes.
///
/// The input is first whitespace-trimmed; if what remains starts and ends
/// with the same quote character (`"` or `'`), that outer pair is removed.
/// Interior spaces, quoted or not, are preserved verbatim. Unbalanced or
/// mismatched quoting is not an error; the substring is returned as-is.
///
/// Returns a subslice of the input; nothing is allocated.
pub fn trim_quotes(s: &str) -> &str {
    let trimmed = s.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}
