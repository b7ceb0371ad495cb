// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated
//! inputs:
//!
//! 1. **Lexing never panics**: arbitrary input yields `Ok` or `Err`
//! 2. **Lexing is deterministic**: same input, same result
//! 3. **Token lines stay within the input**: no position escapes the text
//! 4. **Token lines are monotonic**: emission order follows source order
//! 5. **Known-valid fragments lex cleanly**

use proptest::prelude::*;

use super::lexer::lex;

/// Known-valid fragments that must lex without errors.
const VALID_FRAGMENTS: &[&str] = &[
    "42",
    "88.54",
    "foo",
    "_private",
    "FOO_BAR",
    "true",
    "false",
    "let a = 3",
    "{ a: 23 }",
    "a + b",
    "x += 2",
    "a && b",
    "i++",
    "( ) [ ] { } , . ; :",
    "=>",
    "a = b",
    "'string'",
    "\"double\"",
    "`multi\nline`",
    "// comment",
    "/* block */",
    "class Foo extends Widget {}",
    "namespace fizz { export class Foo {} }",
    "get bar(): number {}",
    "x / 2",
    "match(/ab/gi)",
];

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(std::string::ToString::to_string)
}

proptest! {
    /// Property 1: lexing never panics on arbitrary input.
    #[test]
    fn lexing_never_panics(input in "\\PC{0,500}") {
        let _result = lex(&input);
    }

    /// Property 1b: including inputs with many newlines and quotes.
    #[test]
    fn lexing_never_panics_on_quotes_and_newlines(input in "[\"'`/\\\\\n a-z0-9]{0,200}") {
        let _result = lex(&input);
    }

    /// Property 2: lexing is deterministic.
    #[test]
    fn lexing_deterministic(input in "\\PC{0,200}") {
        let first = lex(&input);
        let second = lex(&input);
        prop_assert_eq!(first, second);
    }

    /// Property 3: every token's lines and the error line stay within the
    /// input's line count.
    #[test]
    fn token_lines_within_input(input in "\\PC{0,300}") {
        let line_count = input.lines().count().max(1) as u32;
        match lex(&input) {
            Ok(tokens) => {
                for token in &tokens {
                    prop_assert!(token.start_line() < line_count);
                    prop_assert!(token.end_line() < line_count);
                    prop_assert!(token.start_line() <= token.end_line());
                }
            }
            Err(error) => {
                // Error lines are 1-based.
                prop_assert!(error.line >= 1);
                prop_assert!(error.line <= line_count);
            }
        }
    }

    /// Property 4: tokens are emitted in source order.
    #[test]
    fn token_lines_monotonic(input in "\\PC{0,300}") {
        if let Ok(tokens) = lex(&input) {
            for window in tokens.windows(2) {
                prop_assert!(
                    window[0].start_line() <= window[1].start_line(),
                    "token order regressed: {:?} then {:?}",
                    window[0],
                    window[1],
                );
            }
        }
    }

    /// Property 5: known-valid fragments lex without errors.
    #[test]
    fn valid_fragments_lex_cleanly(input in valid_fragment()) {
        prop_assert!(lex(&input).is_ok(), "fragment failed to lex: {input:?}");
    }
}
