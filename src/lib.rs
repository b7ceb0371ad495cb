// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration extraction front end for TypeScript-style class sources.
//!
//! This crate reads declaration-oriented source text and produces a
//! structural model of it:
//! - Lexical analysis (tokenization with comment merging)
//! - Parsing (namespace/class/field/property extraction)
//! - Comment rendering (de-indent + markup) for downstream documentation
//!
//! The parser understands just enough of the statement and expression
//! grammar to skip what it does not model (function bodies, interfaces,
//! enums, type aliases, arbitrary expressions) while extracting class
//! member metadata precisely. It never interprets behavior: types and
//! initializers are preserved as literal text for code generators and
//! documentation builders to consume.

pub mod markup;
pub mod model;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::model::{Class, Field, Program, Property};
    pub use crate::source_analysis::{lex, parse, parse_file, parse_source};
}
