//! Input path resolution.

use std::path::PathBuf;

/// Where the input document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input (`-`).
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl InputSource {
    /// Expands environment references in `arg` and maps `-` to stdin.
    pub fn resolve(arg: &str) -> Self {
        let expanded = expand_env(arg);
        if expanded == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(expanded))
        }
    }
}

/// Replaces `$VAR` and `${VAR}` with values from the process environment,
/// following POSIX shell naming. Unset variables expand to the empty string.
pub fn expand_env(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        if after.is_empty() {
            out.push('$');
            rest = after;
            break;
        }
        let (name, width) = shell_name(after);
        match name {
            Some(name) => out.push_str(&lookup(name).unwrap_or_default()),
            // `$` not followed by a name stays as is
            None if width == 0 => out.push('$'),
            // malformed `${...`: the consumed characters are dropped
            None => {}
        }
        rest = &after[width..];
    }
    out.push_str(rest);
    out
}

/// Reads a variable name from the text following a `$`. Returns the name,
/// if any, and how many bytes it consumed.
fn shell_name(s: &str) -> (Option<&str>, usize) {
    let bytes = s.as_bytes();
    if bytes[0] == b'{' {
        if bytes.len() > 2 && is_special(bytes[1]) && bytes[2] == b'}' {
            return (Some(&s[1..2]), 3);
        }
        return match s[1..].find('}') {
            Some(0) => (None, 2),
            Some(end) => (Some(&s[1..end + 1]), end + 2),
            None => (None, 1),
        };
    }
    if is_special(bytes[0]) {
        return (Some(&s[..1]), 1);
    }
    let len = bytes
        .iter()
        .position(|b| !(b.is_ascii_alphanumeric() || *b == b'_'))
        .unwrap_or(bytes.len());
    if len == 0 {
        (None, 0)
    } else {
        (Some(&s[..len]), len)
    }
}

fn is_special(b: u8) -> bool {
    matches!(b, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-' | b'0'..=b'9')
}
