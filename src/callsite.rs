//! Call-site resolution.
//!
//! Every public assertion is `#[track_caller]`, and so is every internal function between
//! it and the resolver, so `Location::caller()` already skips the harness's own frames and
//! lands on the nearest caller outside it. Test helpers can opt into the same behavior by
//! marking themselves `#[track_caller]`, which moves the reported line to *their* caller.
//!
//! As a last check a location inside one of the harness's own source files is rejected,
//! so a report never points into the harness.

use std::panic::Location;

/// Source file of this module, as `file!()` and `Location::file()` spell it.
pub(crate) const SOURCE_FILE: &str = file!();

/// Where an assertion was called from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// File path as reported by the compiler (usually relative to the workspace root).
    pub file: String,
    /// 1-based line number.
    pub line: usize,
}

impl CallSite {
    /// Resolve the caller of the current `#[track_caller]` chain.
    #[track_caller]
    pub fn resolve() -> Option<Self> {
        Self::from_location(Location::caller())
    }

    /// `None` when the location lies inside the harness itself.
    pub fn from_location(location: &Location<'_>) -> Option<Self> {
        if is_internal(location.file()) {
            return None;
        }
        Some(Self {
            file: location.file().to_string(),
            line: location.line() as usize,
        })
    }

    /// File name without directories.
    pub fn file_name(&self) -> &str {
        base_name(&self.file)
    }
}

/// Whether `file` is one of the harness's own sources.
fn is_internal(file: &str) -> bool {
    [SOURCE_FILE, crate::harness::SOURCE_FILE, crate::report::SOURCE_FILE].contains(&file)
}

/// Last path component, splitting on both `/` and `\`.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
