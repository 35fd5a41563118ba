//! Output formatting utilities.

use jf_core::Digest;
use std::io::{self, Write};

/// What the command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The canonical JSON bytes.
    Canonical,
    /// The lowercase hex SHA-256 of the canonical bytes.
    Digest,
}

impl OutputMode {
    /// Maps the `--hash` flag to a mode.
    pub fn from_hash_flag(hash: bool) -> Self {
        if hash {
            OutputMode::Digest
        } else {
            OutputMode::Canonical
        }
    }
}

/// Formats a digest for display.
pub fn format_digest(digest: &Digest) -> String {
    digest.to_hex()
}

/// Writes `bytes` to stdout exactly, without a trailing newline.
pub fn write_stdout(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}
