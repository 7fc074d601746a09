//! Failure message composition.
//!
//! A report is laid out like libtest's own log lines:
//!
//! ```text
//! \tfile.rs:12: <first line> // <comment>
//! \t\t<continuation lines>
//! ```
//!
//! ## Notes
//!
//! - The `$ARGS` placeholder belongs to message templates only. [`expand_args`] fills it
//!   in before values are formatted into a message, so user data is never rewritten.
//! - Every missing piece of detail (location, comment, arguments) is left out; composing a
//!   report cannot fail.

use crate::callsite::CallSite;
use crate::source::SourceCache;

/// Source file of this module, as `file!()` and `Location::file()` spell it.
pub(crate) const SOURCE_FILE: &str = file!();

/// Placeholder for the call site's argument text.
pub const ARGS: &str = "$ARGS";

/// File name shown when the call site cannot be resolved.
pub const UNKNOWN_FILE: &str = "???";

pub const COLOR_NORMAL: &str = "\u{1b}[39m";
pub const COLOR_COMMENT: &str = "\u{1b}[32m";
pub const COLOR_FILE: &str = "\u{1b}[90m";
pub const COLOR_TYPE: &str = "\u{1b}[90m";

/// Source details for one call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
    pub comment: Option<String>,
}

impl Details {
    pub fn lookup(cache: &SourceCache, site: &CallSite) -> Self {
        Self {
            comment: cache.resolve_comment(&site.file, site.line),
        }
    }
}

/// Replace `$ARGS` in a message template with the call's argument text, or remove it.
pub fn expand_args(template: &str, args: Option<&str>) -> String {
    template.replace(ARGS, args.unwrap_or(""))
}

/// Compose the report for `message` raised at `site`.
pub fn report(site: Option<&CallSite>, message: &str, cache: &SourceCache, colorful: bool) -> String {
    match site {
        Some(site) => {
            let details = Details::lookup(cache, site);
            decorate(site.file_name(), site.line, message, &details, colorful)
        }
        None => decorate(UNKNOWN_FILE, 1, message, &Details::default(), colorful),
    }
}

/// Lay out a message with its location prefix and comment suffix.
pub fn decorate(file_name: &str, line: usize, message: &str, details: &Details, colorful: bool) -> String {
    let mut buf = String::from("\t");
    if colorful {
        buf.push_str(COLOR_FILE);
    }
    buf.push_str(&format!("{file_name}:{line}: "));
    if colorful {
        buf.push_str(COLOR_NORMAL);
    }

    let mut lines: Vec<&str> = message.split('\n').collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    for (i, text) in lines.iter().enumerate() {
        if i > 0 {
            buf.push_str("\n\t\t");
        }
        buf.push_str(text);
    }

    if let Some(comment) = &details.comment {
        if colorful {
            buf.push_str(COLOR_COMMENT);
        }
        buf.push_str(" // ");
        buf.push_str(comment);
        if colorful {
            buf.push_str(COLOR_NORMAL);
        }
    }
    buf.push('\n');
    buf
}

/// Argument spellings that already say "nil".
const NIL_LITERALS: [&str; 2] = ["Nil", "None"];

/// `name(value)`, or just `value` when the source text adds nothing: the argument is
/// the value itself, a string literal of it, or a nil literal for `nil`.
pub fn label(name: Option<&str>, value: &str, colorful: bool) -> String {
    let spells_value = |name: &str| {
        name == value
            || name.strip_prefix('"').and_then(|n| n.strip_suffix('"')) == Some(value)
            || (value == "nil" && NIL_LITERALS.contains(&name))
    };
    match name {
        Some(name) if !name.is_empty() && !spells_value(name) => {
            if colorful {
                format!("{name}{COLOR_TYPE}({value}){COLOR_NORMAL}")
            } else {
                format!("{name}({value})")
            }
        }
        _ => value.to_string(),
    }
}
