//! Load-time errors.
//!
//! Every error in this crate happens while rule files are being loaded. Once a
//! [`crate::ResponseEngine`] exists, responding cannot fail.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A malformed rule file, pointing at the offending line (1-based).
///
/// The message already includes `kind`, so the cause chain continues with
/// whatever `kind` wraps (the regex error for `InvalidPattern`).
#[derive(Debug)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("section for pattern '{pattern}' has no candidate lines")]
    EmptySection { pattern: String },

    #[error("candidate line '{text}' appears before any pattern line")]
    CandidateBeforePattern { text: String },
}

/// Failure to produce a [`crate::RuleSet`] from a file on disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read rule file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rule file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Render `err` and every underlying cause as one `a: b: c` line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        cause = inner.source();
    }
    out
}
