// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration parsing.
//!
//! Class declarations are extracted into the model; interfaces, enums,
//! functions, type aliases, and variable declarations are consumed and
//! discarded. Class bodies track sticky modifier flags and a pending
//! comment that apply to the next member and reset afterwards.

use ecow::EcoString;

use crate::model::{Class, Field, Modifiers, Property};
use crate::source_analysis::token::{Keyword, Token, TokenKind};

use super::{attached_comment, ParseError, Parser};

impl Parser {
    // ========================================================================
    // Class Declarations
    // ========================================================================

    /// Parses a class declaration after the `class` keyword.
    ///
    /// A generic parameter list is appended verbatim to the name
    /// (`Collection<T>`); an `extends` clause records the literal supertype
    /// text.
    pub(super) fn parse_class(
        &mut self,
        namespace: Option<&EcoString>,
        exported: bool,
    ) -> Result<Class, ParseError> {
        let mut name: EcoString = self.expect_identifier()?.text().into();
        if self.at_generic_open() {
            name.push_str(&self.skip_generic_suffix()?);
        }

        let mut class = Class {
            name,
            namespace: namespace.cloned(),
            exported,
            ..Class::default()
        };

        if self.peek().text() == "extends" {
            self.next();
            class.extends = Some(self.parse_type()?.into());
        }

        self.expect(&TokenKind::LeftBrace)?;
        self.parse_class_body(&mut class)?;
        Ok(class)
    }

    /// Scans a class body up to its closing `}`.
    fn parse_class_body(&mut self, class: &mut Class) -> Result<(), ParseError> {
        let mut modifiers = Modifiers::default();
        let mut comment: Option<Token> = None;

        loop {
            let token = self.next();
            match token.kind() {
                TokenKind::Comment(_) => {
                    comment = Some(token);
                    continue;
                }

                // `public` is the default; `async` only matters to bodies,
                // which are skipped anyway.
                TokenKind::Keyword(Keyword::Public | Keyword::Async) => continue,
                TokenKind::Keyword(Keyword::Static) => {
                    modifiers.is_static = true;
                    continue;
                }
                TokenKind::Keyword(Keyword::Abstract) => {
                    modifiers.is_abstract = true;
                    continue;
                }
                // Both access modifiers fold into the same flag;
                // `is_protected` stays false.
                TokenKind::Keyword(Keyword::Private | Keyword::Protected) => {
                    modifiers.is_private = true;
                    continue;
                }

                TokenKind::Keyword(Keyword::Get) => {
                    if matches!(self.peek().kind(), TokenKind::LeftParen) {
                        // `get(...)` is an ordinary method named `get`.
                        self.parse_method()?;
                    } else {
                        let property = self.parse_getter(modifiers.is_abstract)?;
                        Self::record_accessor(class, property, modifiers, &comment, &token);
                    }
                }

                TokenKind::Keyword(Keyword::Set) => {
                    if matches!(self.peek().kind(), TokenKind::LeftParen) {
                        self.parse_method()?;
                    } else {
                        let property = self.parse_setter(modifiers.is_abstract)?;
                        Self::record_accessor(class, property, modifiers, &comment, &token);
                    }
                }

                TokenKind::Identifier(_)
                | TokenKind::Keyword(Keyword::Type | Keyword::Is) => {
                    self.parse_member(class, &token, modifiers, &comment)?;
                }

                TokenKind::RightBrace => break,

                kind => {
                    let message = format!("invalid token: {}", kind.name());
                    return Err(self.error(message));
                }
            }

            // Flags and pending comment apply to one member only.
            modifiers = Modifiers::default();
            comment = None;
        }
        Ok(())
    }

    /// Parses a named member: a method (skipped) or a field (recorded).
    fn parse_member(
        &mut self,
        class: &mut Class,
        name_token: &Token,
        modifiers: Modifiers,
        comment: &Option<Token>,
    ) -> Result<(), ParseError> {
        if self.at_generic_open() {
            self.skip_generic_suffix()?;
        }
        // Optional-member marker carries no model information.
        if matches!(self.peek().kind(), TokenKind::Operator(op) if op == "?") {
            self.next();
        }

        match self.peek().kind() {
            TokenKind::LeftParen => {
                self.parse_method()?;
            }
            TokenKind::Colon | TokenKind::Assign => {
                let mut field = self.parse_field(name_token.text().into())?;
                modifiers.apply_to_field(&mut field);
                field.comment = comment
                    .as_ref()
                    .and_then(|c| attached_comment(c, name_token));
                class.fields.push(field);
            }
            _ => {
                let message = format!("invalid token: {}", name_token.kind().name());
                return Err(self.error(message));
            }
        }
        Ok(())
    }

    /// Merges an accessor into an existing property of the same name or
    /// records a new one.
    ///
    /// The first declaration seen supplies type and comment; later ones
    /// only flip the missing accessor flag and back-fill a comment when
    /// none was set.
    fn record_accessor(
        class: &mut Class,
        mut property: Property,
        modifiers: Modifiers,
        comment: &Option<Token>,
        anchor: &Token,
    ) {
        if let Some(existing) = class
            .properties
            .iter_mut()
            .find(|p| p.name == property.name)
        {
            if property.get {
                existing.get = true;
            }
            if property.set {
                existing.set = true;
            }
            if existing.comment.is_none() {
                existing.comment = comment.as_ref().and_then(|c| attached_comment(c, anchor));
            }
        } else {
            modifiers.apply_to_property(&mut property);
            property.comment = comment.as_ref().and_then(|c| attached_comment(c, anchor));
            class.properties.push(property);
        }
    }

    /// Parses a getter declaration after the `get` keyword.
    fn parse_getter(&mut self, is_abstract: bool) -> Result<Property, ParseError> {
        let name: EcoString = self.expect_name_token()?.text().into();

        let mut property = Property {
            name,
            get: true,
            ..Property::default()
        };

        self.expect(&TokenKind::LeftParen)?;
        self.expect(&TokenKind::RightParen)?;

        if matches!(self.peek().kind(), TokenKind::Colon) {
            self.next();
            property.ty = Some(self.parse_type()?.into());
        } else {
            property.ty = Some("any".into());
        }

        if !is_abstract {
            self.skip_block()?;
        }

        Ok(property)
    }

    /// Parses a setter declaration after the `set` keyword.
    fn parse_setter(&mut self, is_abstract: bool) -> Result<Property, ParseError> {
        let name: EcoString = self.expect_name_token()?.text().into();

        let mut property = Property {
            name,
            set: true,
            ..Property::default()
        };

        self.expect(&TokenKind::LeftParen)?;
        self.expect_identifier()?;

        if matches!(self.peek().kind(), TokenKind::Colon) {
            self.next();
            property.ty = Some(self.parse_type()?.into());
        } else {
            property.ty = Some("any".into());
        }

        self.expect(&TokenKind::RightParen)?;

        if !is_abstract {
            self.skip_block()?;
        }

        Ok(property)
    }

    /// Skips a method: argument list, optional return type, body. Overload
    /// signatures that share one implementation chain through the trailing
    /// identifier.
    fn parse_method(&mut self) -> Result<(), ParseError> {
        self.skip_delimited(&TokenKind::LeftParen, &TokenKind::RightParen)?;

        if matches!(self.peek().kind(), TokenKind::Colon) {
            self.next();
            self.parse_type()?;
        }

        if matches!(self.peek().kind(), TokenKind::Identifier(_)) {
            self.next();
            return self.parse_method();
        }

        self.skip_block()?;
        self.skip_optional_semicolon();
        Ok(())
    }

    /// Parses a field after its name: optional `: type`, optional
    /// `= initializer`. An untyped field with an initializer infers
    /// `number` for purely numeric literal text, `any` otherwise.
    pub(super) fn parse_field(&mut self, name: EcoString) -> Result<Field, ParseError> {
        let mut field = Field {
            name,
            ..Field::default()
        };

        if matches!(self.peek().kind(), TokenKind::Colon) {
            self.next();
            field.ty = Some(self.parse_type()?.into());
        }

        if matches!(self.peek().kind(), TokenKind::Assign) {
            self.next();
            let initializer = self.parse_expression()?;
            if field.ty.is_none() {
                field.ty = Some(if is_numeric_literal(&initializer) {
                    "number".into()
                } else {
                    "any".into()
                });
            }
        }

        self.skip_optional_semicolon();
        Ok(field)
    }

    // ========================================================================
    // Skipped Declarations
    // ========================================================================

    /// Consumes an interface declaration; nothing is recorded.
    pub(super) fn parse_interface(&mut self) -> Result<(), ParseError> {
        self.expect_identifier()?;
        if self.at_generic_open() {
            self.skip_generic_suffix()?;
        }
        if self.peek().text() == "extends" {
            self.next();
            self.parse_type()?;
        }
        self.skip_block()?;
        self.skip_optional_semicolon();
        Ok(())
    }

    /// Consumes a function declaration; nothing is recorded.
    pub(super) fn parse_function(&mut self) -> Result<(), ParseError> {
        self.expect_function_name()?;
        if self.at_generic_open() {
            self.skip_generic_suffix()?;
        }
        self.skip_delimited(&TokenKind::LeftParen, &TokenKind::RightParen)?;
        if matches!(self.peek().kind(), TokenKind::Colon) {
            self.next();
            self.parse_type()?;
        }
        self.skip_block()?;
        self.skip_optional_semicolon();
        Ok(())
    }

    /// Function names may also be spelled `get` or `set`.
    fn expect_function_name(&mut self) -> Result<Token, ParseError> {
        let token = self.next();
        match token.kind() {
            TokenKind::Identifier(_) | TokenKind::Keyword(Keyword::Get | Keyword::Set) => {
                Ok(token)
            }
            kind => {
                let message = format!("expected identifier, get, or set, got {}", kind.name());
                Err(self.error(message))
            }
        }
    }

    /// Consumes an enum declaration; nothing is recorded.
    pub(super) fn parse_enum(&mut self) -> Result<(), ParseError> {
        self.expect_identifier()?;
        self.skip_block()?;
        self.skip_optional_semicolon();
        Ok(())
    }

    /// Consumes a type alias: name, optional generics, `=`, one or more
    /// `|`-joined expressions; nothing is recorded.
    pub(super) fn parse_type_alias(&mut self) -> Result<(), ParseError> {
        self.expect_identifier()?;
        if self.at_generic_open() {
            self.skip_generic_suffix()?;
        }
        self.expect(&TokenKind::Assign)?;

        loop {
            self.parse_expression()?;
            if matches!(self.peek().kind(), TokenKind::Operator(op) if op == "|") {
                self.next();
                continue;
            }
            break;
        }
        Ok(())
    }

    /// Consumes a `var`/`let`/`const` declaration by reusing field parsing;
    /// nothing is recorded.
    pub(super) fn parse_variable_statement(&mut self) -> Result<(), ParseError> {
        let name = self.expect_name_token()?;
        self.parse_field(name.text().into())?;
        self.skip_optional_semicolon();
        Ok(())
    }
}

/// Purely numeric literal text, e.g. `33` or `88.54`.
fn is_numeric_literal(text: &str) -> bool {
    text.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_literal_detection() {
        assert!(is_numeric_literal("33"));
        assert!(is_numeric_literal("88.54"));
        assert!(!is_numeric_literal("true"));
        assert!(!is_numeric_literal("4+2*6"));
        assert!(!is_numeric_literal(""));
        assert!(!is_numeric_literal("\"33\""));
    }
}
