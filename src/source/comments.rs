//! Comment scanner for Rust source.
//!
//! `syn` discards ordinary comments, so they are recovered with a small scanner over the raw
//! text. The scanner only needs to know enough Rust lexical structure to avoid mistaking the
//! inside of a literal for a comment:
//!
//! - string literals (`"..."`, `b"..."`, `c"..."`) with escapes
//! - raw strings (`r"..."`, `r#"..."#`, `br##"..."##`)
//! - char literals versus lifetimes/labels (`'a'` vs `'a`)
//! - line comments (`//`, `///`, `//!`) and nested block comments (`/* /* */ */`)

use std::collections::BTreeMap;

/// Comments keyed by the (1-based) line they start on.
pub type CommentMap = BTreeMap<usize, String>;

/// Scan `source` and return every comment keyed by its starting line.
///
/// When several comments start on the same line the last one wins.
pub fn scan_comments(source: &str) -> CommentMap {
    CommentScanner::new(source).scan()
}

struct CommentScanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    comments: CommentMap,
}

impl<'a> CommentScanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            comments: CommentMap::new(),
        }
    }

    fn scan(mut self) -> CommentMap {
        while let Some(c) = self.advance() {
            match c {
                '/' => self.scan_slash(),
                '"' => self.skip_string(),
                '\'' => self.skip_quote(),
                c if is_ident_start(c) => self.scan_identifier(c),
                _ => {}
            }
        }
        self.comments
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn scan_slash(&mut self) {
        let line = self.line;
        if self.match_char('/') {
            let start = self.current_pos;
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
            let body = &self.source[start..self.current_pos];
            let body = body.trim_start_matches('/');
            let body = body.strip_prefix('!').unwrap_or(body);
            self.comments.insert(line, body.trim().to_string());
        } else if self.match_char('*') {
            let start = self.current_pos;
            let mut end = self.current_pos;
            let mut depth = 1usize;
            while let Some(c) = self.advance() {
                if c == '/' && self.match_char('*') {
                    depth += 1;
                } else if c == '*' && self.peek() == Some('/') {
                    end = self.current_pos - 1;
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                end = self.current_pos;
            }
            let body = &self.source[start..end.max(start)];
            let body = body.strip_prefix(['*', '!']).unwrap_or(body);
            self.comments.insert(line, body.trim().to_string());
        }
    }

    // ========================================================================
    // Literals (skipped)
    // ========================================================================

    fn skip_string(&mut self) {
        while let Some(c) = self.advance() {
            match c {
                '\\' => {
                    self.advance();
                }
                '"' => break,
                _ => {}
            }
        }
    }

    fn skip_raw_string(&mut self, hashes: usize) {
        let terminator: String = std::iter::once('"').chain(std::iter::repeat_n('#', hashes)).collect();
        while self.advance().is_some() {
            if self.source[..self.current_pos].ends_with(&terminator) {
                break;
            }
        }
    }

    /// A `'` starts either a char literal or a lifetime/label.
    fn skip_quote(&mut self) {
        let rest = self.rest();
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some('\\'), _) => {
                self.advance();
                self.advance();
                while let Some(c) = self.advance() {
                    if c == '\'' {
                        break;
                    }
                }
            }
            (Some(c), Some('\'')) if c != '\n' => {
                self.advance();
                self.advance();
            }
            _ => {}
        }
    }

    /// Identifiers matter only as raw-string prefixes (`r`, `br`, `cr`).
    fn scan_identifier(&mut self, first: char) {
        let start = self.current_pos - first.len_utf8();
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        let spelling = &self.source[start..self.current_pos];
        if !matches!(spelling, "r" | "br" | "cr") {
            return;
        }
        let rest = self.rest();
        let hashes = rest.len() - rest.trim_start_matches('#').len();
        if rest[hashes..].starts_with('"') {
            for _ in 0..=hashes {
                self.advance();
            }
            self.skip_raw_string(hashes);
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
