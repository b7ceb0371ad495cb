// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Comment-to-markup rendering.
//!
//! Declaration comments are written as markdown, often indented to line up
//! with the member they document. [`render_comment`] strips the shared
//! leading indent and renders the result to HTML.

use pulldown_cmark::{html, Options, Parser};

/// Renders a raw declaration comment to HTML.
///
/// Short comments (up to two lines) are trimmed and rendered directly.
/// Longer comments first have their common leading indent stripped so that
/// markdown block structure survives the source indentation.
#[must_use]
pub fn render_comment(comment: &str) -> String {
    if comment.lines().count() <= 2 {
        return render_markdown(comment.trim());
    }
    render_markdown(&strip_common_indent(comment))
}

/// Strips the leading whitespace shared by a comment's lines.
///
/// The first non-blank line determines the indent (its exact leading
/// whitespace characters), and that prefix is removed from every line
/// that carries it. A first non-blank line with no indent leaves the text
/// unchanged.
#[must_use]
pub fn strip_common_indent(comment: &str) -> String {
    let mut indent: Option<String> = None;

    let lines: Vec<String> = comment
        .split('\n')
        .map(|line| {
            if indent.is_none() && !line.trim().is_empty() {
                let prefix: String = line
                    .chars()
                    .take_while(|c| c.is_whitespace())
                    .collect();
                indent = Some(prefix);
            }

            match indent.as_deref() {
                Some(prefix) if !prefix.is_empty() => line
                    .strip_prefix(prefix)
                    .unwrap_or(line)
                    .to_string(),
                _ => line.to_string(),
            }
        })
        .collect();

    lines.join("\n")
}

/// Renders markdown to HTML with tables and strikethrough enabled.
fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options);

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
