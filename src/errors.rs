//! Error types for source indexing.
//!
//! These errors never reach an assertion's output: the source cache turns every one of them
//! into "not found" and the failure message simply carries less detail. They exist so the
//! `is-index` tool (and anyone calling [`crate::source::SourceIndex::load`] directly) can
//! report why a file could not be indexed.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Failure to build a [`crate::source::SourceIndex`] for a file.
#[derive(Debug, Error, Diagnostic)]
pub enum IndexError {
    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(is::source::io), help("check that the test source is available at run time"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}:{line}:{column}: {message}", path.display())]
    #[diagnostic(code(is::source::parse), help("the file must be valid Rust source"))]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
}

impl IndexError {
    /// Build a parse error from a `syn` error, keeping its start position.
    pub fn parse(path: impl Into<PathBuf>, err: &syn::Error) -> Self {
        let start = err.span().start();
        IndexError::Parse {
            path: path.into(),
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    }
}
