//! Render parsed syntax back to the literal source text it came from.
//!
//! Spans produced by `syn::parse_file` carry line/column positions (the `span-locations`
//! feature of `proc-macro2`), so an argument can be shown exactly as the test author wrote
//! it: `a == get_b()` stays `a == get_b()` instead of the token-stream spelling
//! `a == get_b ()`.

use proc_macro2::{LineColumn, Span};
use quote::ToTokens;
use syn::spanned::Spanned;

/// A source file with precomputed line offsets.
pub struct SourceText<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, line_starts }
    }

    /// Byte offset of a line/column position (1-based line, 0-based column in chars).
    fn offset(&self, at: LineColumn) -> Option<usize> {
        let line_start = *self.line_starts.get(at.line.checked_sub(1)?)?;
        let line = &self.source[line_start..];
        let within = line
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(line.len()))
            .nth(at.column)?;
        Some(line_start + within)
    }

    /// The text covered by `span`, if it maps into this source.
    pub fn slice(&self, span: Span) -> Option<&'a str> {
        let start = self.offset(span.start())?;
        let end = self.offset(span.end())?;
        self.source.get(start..end).filter(|text| !text.is_empty())
    }

    /// Literal text of `node`, falling back to its token-stream spelling.
    pub fn render<T>(&self, node: &T) -> String
    where
        T: ToTokens + Spanned,
    {
        match self.slice(node.span()) {
            Some(text) => text.to_string(),
            None => node.to_token_stream().to_string(),
        }
    }

    /// Literal text of a `let` statement without its terminating `;`.
    pub fn render_local(&self, local: &syn::Local) -> String {
        let text = self.render(local);
        let text = text.trim_end();
        text.strip_suffix(';').unwrap_or(text).trim_end().to_string()
    }
}
