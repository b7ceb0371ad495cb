// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis.
//!
//! [`lex`] converts source text into a token vector in a single forward
//! pass. The lexer is hand-written: the grammar's slash disambiguation
//! (division vs regex literal) needs one-token lookback, and adjacent line
//! comments merge into a single token, both of which want direct control of
//! the emitted token buffer.
//!
//! # Position tracking
//!
//! Lines and columns are zero-based; a newline resets the column and
//! advances the line. Whitespace between tokens is skipped and not
//! represented.
//!
//! # Failure
//!
//! Lexing fails fast with a [`LexError`] on an unterminated string, block
//! comment, or regex literal, and on an operator cluster matching neither
//! fixed list. Characters with no meaning outside a literal are skipped
//! silently.

use std::iter::Peekable;
use std::str::Chars;

use super::error::{LexError, LexErrorKind};
use super::token::{is_comparer_word, is_operator_word, Keyword, Token, TokenKind};

/// Tokenizes `source`, failing on the first lexical violation.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

struct Lexer<'src> {
    chars: Peekable<Chars<'src>>,
    /// Zero-based line of the next unconsumed character.
    line: u32,
    /// Zero-based column of the next unconsumed character.
    column: u32,
    tokens: Vec<Token>,
    /// Set when the most recent token is a block comment, which shares the
    /// comment kind but must not absorb a following line comment.
    last_comment_is_block: bool,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 0,
            column: 0,
            tokens: Vec::new(),
            last_comment_is_block: false,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            self.skip_whitespace();

            // Token positions are captured before the first character is
            // consumed; error lines refer to the same point.
            let line = self.line;
            let column = self.column;
            let Some(c) = self.advance() else { break };

            if let Err(kind) = self.lex_char(c, line, column) {
                return Err(LexError {
                    kind,
                    line: line + 1,
                    column: self.column,
                });
            }
        }
        Ok(self.tokens)
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consumes the next character, tracking line/column.
    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    /// Emits a token that began at `line`/`column` and ends here.
    fn emit(&mut self, kind: TokenKind, line: u32, column: u32) {
        self.tokens
            .push(Token::spanning(kind, line, self.line, column));
        self.last_comment_is_block = false;
    }

    /// Dispatches on the first character of a token.
    fn lex_char(&mut self, c: char, line: u32, column: u32) -> Result<(), LexErrorKind> {
        if is_identifier_start(c) {
            self.read_identifier(c, line, column);
            return Ok(());
        }
        if c.is_ascii_digit() {
            self.read_number(c, line, column);
            return Ok(());
        }

        match c {
            '+' | '-' | '*' | '%' | '&' | '|' | '^' | '<' | '>' | '~' | '?' | '!' => {
                self.read_operator_or_comparer(c, line, column)
            }

            '/' => match self.peek() {
                Some('/') => {
                    self.read_line_comment(line, column);
                    Ok(())
                }
                Some('*') => self.read_block_comment(line, column),
                _ => {
                    if self.slash_is_division() {
                        self.read_operator_or_comparer(c, line, column)
                    } else {
                        self.read_regex(line, column)
                    }
                }
            },

            '(' => {
                self.emit(TokenKind::LeftParen, line, column);
                Ok(())
            }
            ')' => {
                self.emit(TokenKind::RightParen, line, column);
                Ok(())
            }
            '[' => {
                self.emit(TokenKind::LeftBracket, line, column);
                Ok(())
            }
            ']' => {
                self.emit(TokenKind::RightBracket, line, column);
                Ok(())
            }
            '{' => {
                self.emit(TokenKind::LeftBrace, line, column);
                Ok(())
            }
            '}' => {
                self.emit(TokenKind::RightBrace, line, column);
                Ok(())
            }
            ',' => {
                self.emit(TokenKind::Comma, line, column);
                Ok(())
            }
            '.' => {
                self.emit(TokenKind::Dot, line, column);
                Ok(())
            }
            ';' => {
                self.emit(TokenKind::Semicolon, line, column);
                Ok(())
            }
            ':' => {
                self.emit(TokenKind::Colon, line, column);
                Ok(())
            }

            // The character after `=` is consumed either way; `==` therefore
            // collapses to a single assignment token, which the expression
            // continuation rule relies on.
            '=' => {
                if self.advance() == Some('>') {
                    self.emit(TokenKind::Arrow, line, column);
                } else {
                    self.emit(TokenKind::Assign, line, column);
                }
                Ok(())
            }

            // Stray escape outside any literal: skip the escaped character.
            '\\' => {
                self.advance();
                Ok(())
            }

            '\'' | '"' => self.read_string(c, line, column),
            '`' => self.read_template_string(line, column),

            // Anything else has no token; skip it.
            _ => Ok(()),
        }
    }

    /// Reads an identifier or keyword starting with `first`.
    fn read_identifier(&mut self, first: char, line: u32, column: u32) {
        let mut word = String::from(first);
        while self.peek().is_some_and(is_identifier_continue) {
            if let Some(c) = self.advance() {
                word.push(c);
            }
        }

        let kind = match Keyword::from_word(&word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(word.into()),
        };
        self.emit(kind, line, column);
    }

    /// Reads a numeric literal: digits and `.` characters, unvalidated.
    fn read_number(&mut self, first: char, line: u32, column: u32) {
        let mut text = String::from(first);
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
        {
            if let Some(c) = self.advance() {
                text.push(c);
            }
        }
        self.emit(TokenKind::Number(text.into()), line, column);
    }

    /// Greedily reads an operator cluster and classifies it against the
    /// fixed operator/comparer lists.
    fn read_operator_or_comparer(
        &mut self,
        first: char,
        line: u32,
        column: u32,
    ) -> Result<(), LexErrorKind> {
        let mut cluster = String::from(first);
        while self.peek().is_some_and(is_operator_char) {
            if let Some(c) = self.advance() {
                cluster.push(c);
            }
        }

        if is_operator_word(&cluster) {
            self.emit(TokenKind::Operator(cluster.into()), line, column);
            Ok(())
        } else if is_comparer_word(&cluster) {
            self.emit(TokenKind::Comparer(cluster.into()), line, column);
            Ok(())
        } else {
            Err(LexErrorKind::InvalidOperator(cluster.into()))
        }
    }

    /// A `/` is division when the previous token could end an operand.
    fn slash_is_division(&self) -> bool {
        matches!(
            self.tokens.last().map(Token::kind),
            Some(
                TokenKind::Number(_)
                    | TokenKind::Identifier(_)
                    | TokenKind::RightParen
                    | TokenKind::RightBracket
            )
        )
    }

    /// Reads a regex literal. The whole literal, delimiters and trailing
    /// flags included, becomes one string token with no inner structure.
    fn read_regex(&mut self, line: u32, column: u32) -> Result<(), LexErrorKind> {
        let mut text = String::from('/');
        let mut last: Option<char> = None;

        loop {
            match self.advance() {
                None | Some('\n') => return Err(LexErrorKind::UnterminatedRegex),
                Some('/') if last != Some('\\') => {
                    text.push('/');
                    break;
                }
                Some(c) => {
                    text.push(c);
                    last = Some(c);
                }
            }
        }

        while let Some(flag @ ('g' | 'i')) = self.peek() {
            text.push(flag);
            self.advance();
        }

        self.emit(TokenKind::String(text.into()), line, column);
        Ok(())
    }

    /// Reads a quoted string. A backslash and the character after it are
    /// dropped from the value; a raw newline or end of input fails.
    fn read_string(&mut self, quote: char, line: u32, column: u32) -> Result<(), LexErrorKind> {
        let mut text = String::new();
        loop {
            match self.advance() {
                None | Some('\n') => return Err(LexErrorKind::UnterminatedString),
                Some('\\') => {
                    self.advance();
                }
                Some(c) if c == quote => break,
                Some(c) => text.push(c),
            }
        }
        self.emit(TokenKind::String(text.into()), line, column);
        Ok(())
    }

    /// Reads a backtick string: verbatim across lines, no escapes.
    fn read_template_string(&mut self, line: u32, column: u32) -> Result<(), LexErrorKind> {
        let mut text = String::new();
        loop {
            match self.advance() {
                None => return Err(LexErrorKind::UnterminatedString),
                Some('`') => break,
                Some(c) => text.push(c),
            }
        }
        self.emit(TokenKind::String(text.into()), line, column);
        Ok(())
    }

    /// Reads a `//` comment to end of line and emits it trimmed, merging
    /// into a directly preceding line comment when the lines are
    /// consecutive.
    fn read_line_comment(&mut self, line: u32, column: u32) {
        self.advance(); // second '/'

        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.emit_line_comment(text.trim(), line, column);
                    self.advance();
                    break;
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    fn emit_line_comment(&mut self, text: &str, line: u32, column: u32) {
        if !self.last_comment_is_block {
            if let Some(last) = self.tokens.last_mut() {
                // Consecutive lines, nothing in between: extend the
                // previous comment instead of emitting a new token.
                if last.kind().is_comment() && line == last.end_line() + 1 {
                    last.merge_comment(text, line);
                    return;
                }
            }
        }
        self.emit(TokenKind::Comment(text.into()), line, column);
    }

    /// Reads a `/* ... */` comment. The inner text is kept verbatim
    /// (escaped characters retained); the token is the same comment kind as
    /// line comments but never participates in merging.
    fn read_block_comment(&mut self, line: u32, column: u32) -> Result<(), LexErrorKind> {
        self.advance(); // '*'

        let mut text = String::new();
        loop {
            match self.advance() {
                None => return Err(LexErrorKind::UnterminatedComment),
                Some('\\') => {
                    text.push('\\');
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    break;
                }
                Some(c) => text.push(c),
            }
        }

        self.emit(TokenKind::Comment(text.into()), line, column);
        self.last_comment_is_block = true;
        Ok(())
    }
}

/// First character of an identifier: letter or underscore.
fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Continuation character of an identifier: letter, digit, or underscore.
fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Characters that extend an operator cluster. `<`, `>`, and `=` are
/// absent: angle brackets always emit alone (the parser's generic-list
/// heuristic depends on it) and `=` has its own dispatch.
const fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '~' | '?' | '!'
    )
}
