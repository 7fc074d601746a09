//! Source introspection for assertion call sites.
//!
//! ## Modules
//!
//! - `comments` - Comment scanner (comments are invisible to `syn`)
//! - `extract` - Span → literal source text
//! - `index` - Line-keyed index of assertion calls and comments for one file
//! - `cache` - Process-wide, build-once cache of indexes keyed by file path

pub mod cache;
pub mod comments;
pub mod extract;
pub mod index;

pub use cache::{SourceCache, locate};
pub use index::{BINDING, BOOLEAN_ASSERTION, RecordedCall, SourceIndex};
