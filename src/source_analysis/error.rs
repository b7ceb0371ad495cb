// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for lexing and parsing.
//!
//! Both phases fail fast: the first structural violation aborts the whole
//! call with no partial result. Errors carry 1-based line numbers for
//! display and integrate with [`miette`] for diagnostic reporting.

use camino::Utf8PathBuf;
use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// A lexical error encountered during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at {line}:{column}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// 1-based line on which the offending token began.
    pub line: u32,
    /// Zero-based column at the failure point.
    pub column: u32,
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A quoted or backtick string ran to end of line or end of input.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A block comment was not closed before end of input.
    #[error("unterminated block comment")]
    UnterminatedComment,

    /// A regex literal ran to end of line or end of input.
    #[error("unclosed regex literal")]
    UnterminatedRegex,

    /// An operator cluster matched neither the operator nor the comparer
    /// list.
    #[error("invalid operator or comparer '{0}'")]
    InvalidOperator(EcoString),
}

/// A source position used in parse diagnostics.
///
/// Renders as `line:column`, or `file:line:column` when the compilation
/// unit was tagged with a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// The file the source text came from, if known.
    pub file: Option<Utf8PathBuf>,
    /// 1-based line.
    pub line: u32,
    /// Zero-based column.
    pub column: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}:{}", self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// A parse error. The first violation aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[diagnostic()]
pub enum ParseError {
    /// The token stream ended while a construct was still open.
    #[error("{message}: EOF")]
    UnexpectedEof {
        /// What the parser was expecting or doing.
        message: String,
    },

    /// A structural violation at a known source position.
    #[error("{message} at {position}")]
    Syntax {
        /// What the parser was expecting or doing.
        message: String,
        /// Where the offending token began.
        position: Position,
    },
}

/// Any failure surfaced by the combined entry points.
///
/// [`LexError`] and [`ParseError`] are the two diagnostic kinds;
/// [`Error::Read`] wraps the filesystem collaborator's opaque failure when
/// loading source from a path.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Tokenization failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    /// Parsing failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// The source file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// The path that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError {
            kind: LexErrorKind::UnterminatedString,
            line: 3,
            column: 14,
        };
        assert_eq!(err.to_string(), "unterminated string literal at 3:14");

        let err = LexError {
            kind: LexErrorKind::InvalidOperator("&^".into()),
            line: 1,
            column: 2,
        };
        assert_eq!(err.to_string(), "invalid operator or comparer '&^' at 1:2");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::UnexpectedEof {
            message: "expected identifier, got EOF".into(),
        };
        assert_eq!(err.to_string(), "expected identifier, got EOF: EOF");

        let err = ParseError::Syntax {
            message: "invalid token: operator".into(),
            position: Position {
                file: None,
                line: 5,
                column: 8,
            },
        };
        assert_eq!(err.to_string(), "invalid token: operator at 5:8");
    }

    #[test]
    fn position_display_with_file() {
        let position = Position {
            file: Some("widgets.ts".into()),
            line: 12,
            column: 4,
        };
        assert_eq!(position.to_string(), "widgets.ts:12:4");
    }
}
