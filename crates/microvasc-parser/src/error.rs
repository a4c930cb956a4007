//! Error types for microvasc-parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("missing title line (expected a line starting with 'RAT MESENTERY')")]
    MissingTitle,
}

pub type Result<T> = std::result::Result<T, Error>;
