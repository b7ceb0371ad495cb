// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression and type text reconstruction.
//!
//! Expressions and types are not parsed into an AST. They are rebuilt as
//! literal text by concatenating consumed token values while keeping
//! bracket nesting balanced for `()`, `[]`, `{}`, and generic `<...>`
//! lists. Arrow functions and function expressions are recursed into only
//! to keep the nesting right; their contents are never interpreted.
//!
//! String literals re-emitted here take canonical escaped-string quoting
//! rather than their original quote character, so a field typed by a
//! string literal records that canonical quoted text.

use crate::source_analysis::token::{is_comparer_word, is_operator_word, Keyword, TokenKind};

use super::{ParseError, Parser};

impl Parser {
    /// Reconstructs a type expression. Types share the expression grammar.
    pub(super) fn parse_type(&mut self) -> Result<String, ParseError> {
        self.parse_expression()
    }

    /// Reconstructs an expression: value expressions joined by tokens whose
    /// text is in the operator or comparer list.
    ///
    /// The membership test is on raw token text, so an assignment token
    /// (`=` is a comparer-list word) also extends the expression.
    pub(super) fn parse_expression(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            text.push_str(&self.parse_value_expression()?);

            let continues = {
                let next = self.peek().text();
                is_operator_word(next) || is_comparer_word(next)
            };
            if continues {
                text.push_str(self.next().text());
                continue;
            }
            break;
        }
        Ok(text)
    }

    /// A simple value followed by postfix member access, calls, indexing,
    /// and `is` type guards.
    fn parse_value_expression(&mut self) -> Result<String, ParseError> {
        let mut text = self.parse_simple_value_expression()?;

        loop {
            match self.peek().kind() {
                TokenKind::Dot => {
                    text.push_str(self.next().text());
                    text.push_str(&self.parse_value_expression()?);
                }
                TokenKind::LeftParen => {
                    text.push_str(
                        &self.skip_delimited(&TokenKind::LeftParen, &TokenKind::RightParen)?,
                    );
                }
                TokenKind::LeftBracket => {
                    text.push_str(
                        &self.skip_delimited(&TokenKind::LeftBracket, &TokenKind::RightBracket)?,
                    );
                }
                TokenKind::Keyword(Keyword::Is) => {
                    self.next();
                    let guarded = self.parse_expression()?;
                    text.push_str(&guarded);
                }
                _ => break,
            }
        }
        Ok(text)
    }

    fn parse_simple_value_expression(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();

        match self.peek().kind() {
            // Parenthesized expression or arrow-function head.
            TokenKind::LeftParen => {
                text.push_str(
                    &self.skip_delimited(&TokenKind::LeftParen, &TokenKind::RightParen)?,
                );
                if matches!(self.peek().kind(), TokenKind::Arrow) {
                    text.push_str(self.next().text());
                    if matches!(self.peek().kind(), TokenKind::LeftBrace) {
                        text.push_str(&self.skip_block()?);
                    } else {
                        text.push_str(&self.parse_expression()?);
                    }
                }
            }

            TokenKind::Keyword(Keyword::Function) => {
                text.push_str(self.next().text());
                if self.at_generic_open() {
                    text.push_str(&self.skip_generic_suffix()?);
                }
                text.push_str(
                    &self.skip_delimited(&TokenKind::LeftParen, &TokenKind::RightParen)?,
                );
                if matches!(self.peek().kind(), TokenKind::Colon) {
                    text.push_str(self.next().text());
                    text.push_str(&self.parse_type()?);
                }
                text.push_str(&self.skip_block()?);
            }

            TokenKind::LeftBracket => {
                text.push_str(
                    &self.skip_delimited(&TokenKind::LeftBracket, &TokenKind::RightBracket)?,
                );
            }

            TokenKind::LeftBrace => {
                text.push_str(&self.skip_block()?);
            }

            TokenKind::Number(_)
            | TokenKind::Keyword(
                Keyword::True | Keyword::False | Keyword::Null | Keyword::Undefined,
            ) => {
                text.push_str(self.next().text());
            }

            TokenKind::String(_) => {
                let token = self.next();
                text.push_str(&canonical_quote(token.text()));
            }

            TokenKind::Identifier(_) => {
                text.push_str(&self.parse_identifier_expression()?);
            }

            kind => {
                let message = format!("invalid token: {}", kind.name());
                return Err(self.error(message));
            }
        }

        Ok(text)
    }

    /// A dotted identifier chain, optionally followed by an arrow-function
    /// body or a generic argument list.
    fn parse_identifier_expression(&mut self) -> Result<String, ParseError> {
        let mut text = self.parse_dotted_identifier()?;

        if matches!(self.peek().kind(), TokenKind::Arrow) {
            text.push_str(self.next().text());
            if matches!(self.peek().kind(), TokenKind::LeftBrace) {
                text.push_str(&self.skip_block()?);
            } else {
                text.push_str(&self.parse_expression()?);
            }
            return Ok(text);
        }

        if self.at_generic_open() {
            text.push_str(&self.skip_generic_suffix()?);
        }

        Ok(text)
    }

    /// One or more identifiers joined by dots: `Intl.DateTimeFormat`.
    fn parse_dotted_identifier(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            let token = self.expect_identifier()?;
            text.push_str(token.text());

            if matches!(self.peek().kind(), TokenKind::Dot) {
                text.push_str(self.next().text());
                continue;
            }
            break;
        }
        Ok(text)
    }

    // ========================================================================
    // Balanced Skips
    // ========================================================================

    /// True when the next token is the `<` comparer.
    pub(super) fn at_generic_open(&self) -> bool {
        matches!(self.peek().kind(), TokenKind::Comparer(op) if op == "<")
    }

    /// Consumes from an opening delimiter to its matching closer, tracking
    /// nested same-kind pairs, and returns the concatenated text.
    pub(super) fn skip_delimited(
        &mut self,
        open: &TokenKind,
        close: &TokenKind,
    ) -> Result<String, ParseError> {
        let token = self.expect(open)?;
        let mut text = String::from(token.text());
        let mut nesting = 0u32;

        loop {
            let token = self.next();
            if token.is_eof() {
                return Err(self.error("invalid token"));
            }
            text.push_str(token.text());

            if token.kind() == open {
                nesting += 1;
            } else if token.kind() == close {
                if nesting == 0 {
                    break;
                }
                nesting -= 1;
            }
        }
        Ok(text)
    }

    /// Consumes a `{ ... }` block and returns its concatenated text.
    pub(super) fn skip_block(&mut self) -> Result<String, ParseError> {
        self.skip_delimited(&TokenKind::LeftBrace, &TokenKind::RightBrace)
    }

    /// Consumes a generic argument list from its opening `<` to the first
    /// net-zero `>` and returns the concatenated text.
    ///
    /// A `<` comparer directly after a name always opens a generic list
    /// here; a genuine less-than comparison in that exact position is read
    /// the same way. The grammar accepts this ambiguity.
    pub(super) fn skip_generic_suffix(&mut self) -> Result<String, ParseError> {
        let token = self.next();
        if !matches!(token.kind(), TokenKind::Comparer(op) if op == "<") {
            return Err(self.error(format!(
                "expected <, got {}: '{}'",
                token.kind().name(),
                token.text()
            )));
        }

        let mut text = String::from(token.text());
        let mut nesting = 0u32;

        loop {
            let token = self.next();
            if token.is_eof() {
                return Err(self.error("invalid token"));
            }
            text.push_str(token.text());

            if let TokenKind::Comparer(op) = token.kind() {
                if op == "<" {
                    nesting += 1;
                } else if op == ">" {
                    if nesting == 0 {
                        break;
                    }
                    nesting -= 1;
                }
            }
        }
        Ok(text)
    }
}

/// Canonical escaped-string quoting for string literals re-emitted inside
/// reconstructed text.
fn canonical_quote(text: &str) -> String {
    // Serializing a plain string cannot fail; the fallback never runs.
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}
