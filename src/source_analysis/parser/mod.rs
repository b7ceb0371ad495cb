// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for declaration sources.
//!
//! The parser consumes the lexer's token stream through a single forward
//! cursor and builds a [`Program`]. Only class declarations and their
//! members are modeled; every other construct (interfaces, enums, type
//! aliases, function bodies, arbitrary expression statements) is parsed
//! just enough to skip it without losing synchronization.
//!
//! Parsing is batch and fail-fast: the first structural violation aborts
//! with a [`ParseError`] and no partial result. There is no recovery mode.
//!
//! # Usage
//!
//! ```
//! use declmap::source_analysis::parse_source;
//!
//! let program = parse_source("namespace app { export class Point { x = 0 } }")?;
//! assert_eq!(program.classes.len(), 1);
//! assert_eq!(program.classes[0].name, "Point");
//! # Ok::<(), declmap::source_analysis::Error>(())
//! ```

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ecow::EcoString;

use crate::model::Program;

use super::error::{Error, ParseError, Position};
use super::lexer::lex;
use super::token::{Keyword, Token, TokenKind};

mod declarations;
mod expressions;

/// Parses a token stream into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens, None).parse_program()
}

/// Lexes and parses source text.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = lex(source)?;
    Ok(parse(tokens)?)
}

/// Lexes and parses source text, tagging diagnostics with a file name.
pub fn parse_source_in_file(
    source: &str,
    file: impl Into<Utf8PathBuf>,
) -> Result<Program, Error> {
    let tokens = lex(source)?;
    Ok(Parser::new(tokens, Some(file.into())).parse_program()?)
}

/// Reads and parses a source file.
pub fn parse_file(path: &Utf8Path) -> Result<Program, Error> {
    let source = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_source_in_file(&source, path)
}

/// The parser state.
pub(super) struct Parser {
    tokens: Vec<Token>,
    current: usize,
    file: Option<Utf8PathBuf>,
    /// Synthetic end-of-input token returned once the cursor passes the end.
    eof: Token,
}

impl Parser {
    fn new(tokens: Vec<Token>, file: Option<Utf8PathBuf>) -> Self {
        Self {
            tokens,
            current: 0,
            file,
            eof: Token::new(TokenKind::Eof, 0, 0),
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token without advancing.
    pub(super) fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    /// Consumes and returns the current token.
    pub(super) fn next(&mut self) -> Token {
        match self.tokens.get(self.current) {
            Some(token) => {
                self.current += 1;
                token.clone()
            }
            None => self.eof.clone(),
        }
    }

    /// Builds a parse error at the current cursor position.
    pub(super) fn error(&self, message: impl Into<String>) -> ParseError {
        let token = self.peek();
        if token.is_eof() {
            ParseError::UnexpectedEof {
                message: message.into(),
            }
        } else {
            ParseError::Syntax {
                message: message.into(),
                position: Position {
                    file: self.file.clone(),
                    line: token.start_line() + 1,
                    column: token.column(),
                },
            }
        }
    }

    /// Consumes a token of the expected kind (payload ignored).
    pub(super) fn expect(&mut self, expected: &TokenKind) -> Result<Token, ParseError> {
        let token = self.next();
        if std::mem::discriminant(token.kind()) == std::mem::discriminant(expected) {
            Ok(token)
        } else {
            Err(self.error(format!(
                "expected {}, got {}: '{}'",
                expected.name(),
                token.kind().name(),
                preview(token.text())
            )))
        }
    }

    /// Consumes an identifier token.
    pub(super) fn expect_identifier(&mut self) -> Result<Token, ParseError> {
        let token = self.next();
        match token.kind() {
            TokenKind::Identifier(_) => Ok(token),
            _ => Err(self.error(format!(
                "expected identifier, got {}: '{}'",
                token.kind().name(),
                preview(token.text())
            ))),
        }
    }

    /// Consumes an identifier with a specific spelling.
    fn expect_identifier_text(&mut self, text: &str) -> Result<Token, ParseError> {
        let token = self.expect_identifier()?;
        if token.text() == text {
            Ok(token)
        } else {
            Err(self.error(format!("expected {}, got '{}'", text, preview(token.text()))))
        }
    }

    /// Consumes a specific keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, ParseError> {
        let token = self.next();
        if token.kind().is_keyword(keyword) {
            Ok(token)
        } else {
            Err(self.error(format!(
                "expected {}, got {}: '{}'",
                keyword.as_str(),
                token.kind().name(),
                preview(token.text())
            )))
        }
    }

    /// Consumes a string token.
    fn expect_string(&mut self) -> Result<Token, ParseError> {
        let token = self.next();
        match token.kind() {
            TokenKind::String(_) => Ok(token),
            _ => Err(self.error(format!(
                "expected string, got {}: '{}'",
                token.kind().name(),
                preview(token.text())
            ))),
        }
    }

    /// Consumes a member-name-shaped token: identifier, `type`, or `class`
    /// (reserved words that still name members and variables).
    pub(super) fn expect_name_token(&mut self) -> Result<Token, ParseError> {
        let token = self.next();
        match token.kind() {
            TokenKind::Identifier(_)
            | TokenKind::Keyword(Keyword::Type | Keyword::Class) => Ok(token),
            _ => Err(self.error(format!(
                "expected identifier, type, or class, got {}: '{}'",
                token.kind().name(),
                preview(token.text())
            ))),
        }
    }

    /// Consumes the current token if it is a semicolon.
    pub(super) fn skip_optional_semicolon(&mut self) {
        if matches!(self.peek().kind(), TokenKind::Semicolon) {
            self.next();
        }
    }

    // ========================================================================
    // Top Level & Statements
    // ========================================================================

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();
        loop {
            match self.peek().kind() {
                TokenKind::Eof => break,
                // Comments at the very top level attach to nothing.
                TokenKind::Comment(_) => {
                    self.next();
                }
                TokenKind::Keyword(Keyword::Namespace) => {
                    self.next();
                    self.parse_namespace(&mut program)?;
                }
                _ => self.parse_statements(None, &mut program)?,
            }
        }
        Ok(program)
    }

    /// Parses `namespace <name> { ... }`. Namespaces are a flat tag, not a
    /// nesting structure.
    fn parse_namespace(&mut self, program: &mut Program) -> Result<(), ParseError> {
        let name: EcoString = self.expect_identifier()?.text().into();
        self.expect(&TokenKind::LeftBrace)?;
        self.parse_statements(Some(&name), program)?;
        self.expect(&TokenKind::RightBrace)?;
        Ok(())
    }

    /// Parses a statement sequence until `}` or end of input, collecting
    /// class declarations into `program` and consuming everything else.
    ///
    /// A pending comment and `export` flag accumulate across modifier
    /// tokens and clear after each complete statement.
    fn parse_statements(
        &mut self,
        namespace: Option<&EcoString>,
        program: &mut Program,
    ) -> Result<(), ParseError> {
        let mut exported = false;
        let mut comment: Option<Token> = None;

        loop {
            match self.peek().kind() {
                TokenKind::Comment(_) => {
                    comment = Some(self.next());
                    continue;
                }
                TokenKind::Keyword(Keyword::Export) => {
                    self.next();
                    exported = true;
                    continue;
                }
                TokenKind::Keyword(Keyword::Abstract | Keyword::Declare | Keyword::Async) => {
                    self.next();
                    continue;
                }
                TokenKind::Keyword(Keyword::Import) => self.parse_import()?,
                TokenKind::Keyword(Keyword::Class) => {
                    let keyword = self.next();
                    let mut class = self.parse_class(namespace, exported)?;
                    class.comment = comment
                        .take()
                        .and_then(|c| attached_comment(&c, &keyword));
                    program.classes.push(class);
                }
                TokenKind::Keyword(Keyword::Interface) => {
                    self.next();
                    self.parse_interface()?;
                }
                TokenKind::Keyword(Keyword::Function) => {
                    self.next();
                    self.parse_function()?;
                }
                TokenKind::Keyword(Keyword::Enum) => {
                    self.next();
                    self.parse_enum()?;
                }
                TokenKind::Keyword(Keyword::Type) => {
                    self.next();
                    self.parse_type_alias()?;
                }
                TokenKind::Keyword(Keyword::Var | Keyword::Let | Keyword::Const) => {
                    self.next();
                    self.parse_variable_statement()?;
                }
                // Top-level side-effecting statements are consumed whole.
                TokenKind::Identifier(_) => {
                    self.parse_expression()?;
                }
                TokenKind::RightBrace | TokenKind::Eof => break,
                kind => {
                    let message = format!("invalid token: {}", kind.name());
                    return Err(self.error(message));
                }
            }

            comment = None;
            exported = false;
        }
        Ok(())
    }

    /// Consumes an import statement; nothing is recorded.
    fn parse_import(&mut self) -> Result<(), ParseError> {
        self.expect_keyword(Keyword::Import)?;

        let token = self.next();
        match token.kind() {
            // Side-effect import: `import "module"`
            TokenKind::String(_) => return Ok(()),
            TokenKind::Operator(op) => {
                if op != "*" {
                    return Err(
                        self.error(format!("invalid token: '{}'", preview(token.text())))
                    );
                }
            }
            TokenKind::Identifier(_) => {}
            kind => {
                let message = format!("invalid token: {}", kind.name());
                return Err(self.error(message));
            }
        }

        self.expect_identifier_text("as")?;
        self.expect_identifier()?;
        self.expect_identifier_text("from")?;
        self.expect_string()?;
        Ok(())
    }
}

/// Returns the comment's text when it sits on the line directly above the
/// anchor token, with no blank line between; otherwise the comment is
/// dropped for association purposes.
pub(super) fn attached_comment(comment: &Token, anchor: &Token) -> Option<EcoString> {
    (comment.end_line() + 1 == anchor.end_line()).then(|| comment.text().into())
}

/// Truncates token text for diagnostics.
fn preview(text: &str) -> String {
    text.chars().take(20).collect()
}
