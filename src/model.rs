// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The declaration model produced by parsing.
//!
//! A [`Program`] holds every class found in a compilation unit, in source
//! order, regardless of which `namespace` block declared it. Classes carry
//! their fields and accessor properties along with the raw comment text
//! attached to each declaration.
//!
//! Type and initializer information is deliberately textual: a field typed
//! `Collection<Widget>` stores exactly that string. Downstream consumers
//! (code generators, documentation builders) render the text; they never
//! need a resolved type graph.

use ecow::EcoString;

/// Top-level container for the declarations of one compilation unit.
///
/// Classes appear in source-encounter order. Namespaces are a flat tag on
/// each class, not a nesting structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Every class declaration found, in source order.
    pub classes: Vec<Class>,
}

impl Program {
    /// Creates an empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// A class declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Class {
    /// The class name, including any generic parameter list verbatim
    /// (e.g. `Collection<T>`).
    pub name: EcoString,
    /// The enclosing namespace tag, if the class was declared inside one.
    pub namespace: Option<EcoString>,
    /// The literal supertype expression from an `extends` clause
    /// (e.g. `Array<T>` or `A.Bar`), unresolved.
    pub extends: Option<EcoString>,
    /// Whether the declaration carried an `export` modifier.
    pub exported: bool,
    /// Comment text from the line(s) immediately above the declaration.
    pub comment: Option<EcoString>,
    /// Plain data fields, in declaration order.
    pub fields: Vec<Field>,
    /// Accessor properties, one entry per name (getter and setter of the
    /// same name collapse into a single entry).
    pub properties: Vec<Property>,
}

/// A plain data field of a class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    /// The field name.
    pub name: EcoString,
    /// The literal type text. Untyped fields with an initializer infer
    /// `number` (purely numeric initializer) or `any`.
    pub ty: Option<EcoString>,
    /// Comment text from the line(s) immediately above the member.
    pub comment: Option<EcoString>,
    /// Declared `private` or `protected`.
    pub is_private: bool,
    /// Protected members are currently folded into [`Field::is_private`];
    /// this flag is carried for model compatibility and stays `false`.
    pub is_protected: bool,
    /// Declared `abstract`.
    pub is_abstract: bool,
    /// Declared `static`.
    pub is_static: bool,
}

/// An accessor property of a class, merged from its getter and/or setter
/// declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    /// The property name.
    pub name: EcoString,
    /// The literal type text; `any` when the accessor declared none.
    /// Whichever accessor was declared first supplies it.
    pub ty: Option<EcoString>,
    /// Comment text from the line(s) immediately above the first accessor
    /// that carried one.
    pub comment: Option<EcoString>,
    /// Declared `private` or `protected`.
    pub is_private: bool,
    /// Protected members are currently folded into [`Property::is_private`];
    /// this flag is carried for model compatibility and stays `false`.
    pub is_protected: bool,
    /// Declared `abstract` (accessor bodies are omitted when abstract).
    pub is_abstract: bool,
    /// Declared `static`.
    pub is_static: bool,
    /// A getter was declared for this name.
    pub get: bool,
    /// A setter was declared for this name.
    pub set: bool,
}

/// Sticky member modifier flags.
///
/// The class-body scan accumulates modifier keywords into one of these,
/// applies it to the member that follows, and resets it. Passed by value so
/// no scan state leaks between members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// `private` or `protected` was seen.
    pub is_private: bool,
    /// Carried for model compatibility; no modifier sets it.
    pub is_protected: bool,
    /// `abstract` was seen.
    pub is_abstract: bool,
    /// `static` was seen.
    pub is_static: bool,
}

impl Modifiers {
    /// Applies these flags to a field.
    pub fn apply_to_field(self, field: &mut Field) {
        field.is_private = self.is_private;
        field.is_protected = self.is_protected;
        field.is_abstract = self.is_abstract;
        field.is_static = self.is_static;
    }

    /// Applies these flags to a property.
    pub fn apply_to_property(self, property: &mut Property) {
        property.is_private = self.is_private;
        property.is_protected = self.is_protected;
        property.is_abstract = self.is_abstract;
        property.is_static = self.is_static;
    }
}
