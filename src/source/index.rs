//! Line-keyed index of one Rust source file.
//!
//! The index answers two questions for a line number:
//!
//! - which assertion call (`is.<method>(..)`) is on that line, and what did its arguments
//!   look like in source,
//! - which comment starts on that line.
//!
//! ## Notes
//!
//! - Calls are recognised by their receiver: a plain path expression naming the harness
//!   binding (`is`). Macro bodies are opaque to `syn` and are not indexed.
//! - A call is recorded at the line of its receiver and at the line of its method name, so
//!   it is found whichever line the caller location points at. The outermost call wins when
//!   several share a line.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use syn::visit::{self, Visit};

use super::comments::{CommentMap, scan_comments};
use super::extract::SourceText;
use crate::errors::IndexError;

/// Conventional name of the local harness binding: `let is = Is::new();`.
pub const BINDING: &str = "is";

/// Method name of the boolean assertion (`is.that(cond)`).
pub const BOOLEAN_ASSERTION: &str = "that";

/// An assertion call recovered from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Method invoked on the binding (`equal`, `that`, ...).
    pub method: String,
    /// Literal source text of each argument.
    pub args: Vec<String>,
    /// The `let` statement that bound the first argument, when it is a plain identifier.
    pub declaration: Option<String>,
}

impl RecordedCall {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Argument text worth splicing into a `$ARGS` placeholder.
    ///
    /// Only the boolean assertion has one: its single condition. Other kinds compare
    /// values and render them separately.
    pub fn expansion(&self) -> Option<&str> {
        if self.method == BOOLEAN_ASSERTION {
            self.arg(0)
        } else {
            None
        }
    }
}

/// Parsed, immutable view of a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceIndex {
    calls: BTreeMap<usize, RecordedCall>,
    comments: CommentMap,
}

impl SourceIndex {
    /// Read and index the file at `path`.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let source = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source).map_err(|err| IndexError::parse(path, &err))
    }

    /// Index Rust source text.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn parse(source: &str) -> Result<Self, syn::Error> {
        let file = syn::parse_file(source)?;

        let mut collector = CallCollector::new(SourceText::new(source));
        collector.visit_file(&file);

        let index = Self {
            calls: collector.calls,
            comments: scan_comments(source),
        };
        tracing::debug!(calls = index.calls.len(), comments = index.comments.len(), "indexed source");
        Ok(index)
    }

    pub fn call_at(&self, line: usize) -> Option<&RecordedCall> {
        self.calls.get(&line)
    }

    pub fn comment_at(&self, line: usize) -> Option<&str> {
        self.comments.get(&line).map(String::as_str)
    }

    /// Argument text for a `$ARGS` expansion at `line`.
    pub fn arguments_at(&self, line: usize) -> Option<&str> {
        self.call_at(line)?.expansion()
    }

    pub fn calls(&self) -> impl Iterator<Item = (usize, &RecordedCall)> {
        self.calls.iter().map(|(line, call)| (*line, call))
    }

    pub fn comments(&self) -> impl Iterator<Item = (usize, &str)> {
        self.comments.iter().map(|(line, text)| (*line, text.as_str()))
    }

    /// Human-readable listing, one entry per line, calls before comments.
    pub fn dump(&self) -> String {
        let mut lines: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (line, call) in self.calls() {
            let mut entry = format!("call {}({})", call.method, call.args.join(", "));
            if let Some(decl) = &call.declaration {
                entry.push_str(&format!(" [{decl}]"));
            }
            lines.entry(line).or_default().push(entry);
        }
        for (line, text) in self.comments() {
            lines.entry(line).or_default().push(format!("comment {text:?}"));
        }

        let mut out = String::new();
        for (line, entries) in lines {
            for entry in entries {
                out.push_str(&format!("{line:>4}: {entry}\n"));
            }
        }
        out
    }
}

// ============================================================================
// Call collection
// ============================================================================

/// Walks a parsed file recording harness calls and the `let` bindings in scope.
struct CallCollector<'a> {
    text: SourceText<'a>,
    calls: BTreeMap<usize, RecordedCall>,
    /// One frame per block; identifier → declaring `let` statement text.
    scopes: Vec<HashMap<String, String>>,
}

impl<'a> CallCollector<'a> {
    fn new(text: SourceText<'a>) -> Self {
        Self {
            text,
            calls: BTreeMap::new(),
            scopes: vec![HashMap::new()],
        }
    }

    fn lookup(&self, name: &str) -> Option<&String> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn declare(&mut self, pat: &syn::Pat, declaration: &str) {
        let mut names = Vec::new();
        bound_names(pat, &mut names);
        if let Some(scope) = self.scopes.last_mut() {
            for name in names {
                scope.insert(name, declaration.to_string());
            }
        }
    }

    fn record(&mut self, call: &syn::ExprMethodCall) {
        let args: Vec<String> = call.args.iter().map(|arg| self.text.render(arg)).collect();
        let declaration = call
            .args
            .first()
            .and_then(plain_ident)
            .and_then(|name| self.lookup(&name))
            .cloned();

        let recorded = RecordedCall {
            method: call.method.to_string(),
            args,
            declaration,
        };

        let receiver_line = receiver_ident(&call.receiver).map(|ident| ident.span().start().line);
        let method_line = call.method.span().start().line;
        for line in receiver_line.into_iter().chain(std::iter::once(method_line)) {
            self.calls.entry(line).or_insert_with(|| recorded.clone());
        }
    }
}

impl<'ast> Visit<'ast> for CallCollector<'_> {
    fn visit_block(&mut self, block: &'ast syn::Block) {
        self.scopes.push(HashMap::new());
        visit::visit_block(self, block);
        self.scopes.pop();
    }

    fn visit_local(&mut self, local: &'ast syn::Local) {
        // The initializer sees the previous binding of a shadowed name.
        visit::visit_local(self, local);
        let declaration = self.text.render_local(local);
        self.declare(&local.pat, &declaration);
    }

    fn visit_expr_method_call(&mut self, call: &'ast syn::ExprMethodCall) {
        if receiver_ident(&call.receiver).is_some_and(|ident| ident == BINDING) {
            self.record(call);
        }
        visit::visit_expr_method_call(self, call);
    }
}

fn receiver_ident(expr: &syn::Expr) -> Option<&syn::Ident> {
    match expr {
        syn::Expr::Path(path) if path.qself.is_none() => path.path.get_ident(),
        syn::Expr::Paren(inner) => receiver_ident(&inner.expr),
        _ => None,
    }
}

/// `name`, `&name` or `&mut name` as a bare identifier.
fn plain_ident(expr: &syn::Expr) -> Option<String> {
    match expr {
        syn::Expr::Path(path) if path.qself.is_none() => path.path.get_ident().map(ToString::to_string),
        syn::Expr::Reference(reference) => plain_ident(&reference.expr),
        syn::Expr::Paren(inner) => plain_ident(&inner.expr),
        _ => None,
    }
}

/// Collect every identifier a pattern binds.
fn bound_names(pat: &syn::Pat, names: &mut Vec<String>) {
    match pat {
        syn::Pat::Ident(ident) => {
            names.push(ident.ident.to_string());
            if let Some((_, sub)) = &ident.subpat {
                bound_names(sub, names);
            }
        }
        syn::Pat::Type(typed) => bound_names(&typed.pat, names),
        syn::Pat::Reference(reference) => bound_names(&reference.pat, names),
        syn::Pat::Paren(paren) => bound_names(&paren.pat, names),
        syn::Pat::Tuple(tuple) => tuple.elems.iter().for_each(|p| bound_names(p, names)),
        syn::Pat::TupleStruct(tuple) => tuple.elems.iter().for_each(|p| bound_names(p, names)),
        syn::Pat::Slice(slice) => slice.elems.iter().for_each(|p| bound_names(p, names)),
        syn::Pat::Struct(strukt) => strukt.fields.iter().for_each(|field| bound_names(&field.pat, names)),
        syn::Pat::Or(or) => {
            if let Some(first) = or.cases.first() {
                bound_names(first, names);
            }
        }
        _ => {}
    }
}
