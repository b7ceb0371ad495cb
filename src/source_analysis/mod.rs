// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source analysis: lexing and parsing.
//!
//! The [`lex`] function converts source text into a [`Token`] stream; the
//! [`parse`] family turns tokens into a [`Program`](crate::model::Program).
//! Both are strict pipeline stages: the lexer has no knowledge of the
//! parser, and the parser depends only on the token contract.
//!
//! ```
//! use declmap::source_analysis::{lex, TokenKind};
//!
//! let tokens = lex("let a = 3")?;
//! assert_eq!(tokens.len(), 4);
//! assert!(matches!(tokens[1].kind(), TokenKind::Identifier(_)));
//! # Ok::<(), declmap::source_analysis::LexError>(())
//! ```
//!
//! # Error Handling
//!
//! Both stages fail fast: [`LexError`] on the first lexical violation,
//! [`ParseError`] on the first structural one. No partial result is
//! produced and there is no recovery mode. The combined entry points
//! ([`parse_source`], [`parse_file`]) surface either kind through
//! [`Error`].

mod error;
mod lexer;
mod parser;
mod token;

#[cfg(test)]
mod lexer_property_tests;

pub use error::{Error, LexError, LexErrorKind, ParseError, Position};
pub use lexer::lex;
pub use parser::{parse, parse_file, parse_source, parse_source_in_file};
pub use token::{Keyword, Token, TokenKind};
