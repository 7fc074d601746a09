#![forbid(unsafe_code)]
//! Test assertions that explain themselves.
//!
//! A failing assertion reports where it was called, the source text of its arguments, a
//! type-aware rendering of the values involved, and the comment written on that line:
//!
//! ```no_run
//! use is_harness::Is;
//!
//! let is = Is::new();
//! let (a, b) = (1, 2);
//! is.equal(a, b); // expect to be the same
//! ```
//!
//! ```text
//!     your_test.rs:5: a(1) != b(2) // expect to be the same
//! ```
//!
//! ## How it works
//!
//! - [`callsite`] finds the caller's file and line through `#[track_caller]`.
//! - [`source`] parses that file once with `syn`, indexing every `is.<method>(..)` call and
//!   every comment by line; the index is cached for the whole process.
//! - [`value`] compares values structurally (nil-aware) and renders them.
//! - [`report`] composes the message; the harness writes it and signals the failure.
//!
//! ## Panic Policy
//!
//! - **Library code**: no `unwrap`/`expect`. Missing or unparseable sources only make a
//!   report less detailed; they never make it fail.
//! - **Strict mode**: the libtest host panics on purpose; that is how a test is aborted.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod callsite;
pub mod config;
pub mod errors;
pub mod harness;
pub mod output;
pub mod report;
pub mod source;
pub mod value;

pub use callsite::CallSite;
pub use config::Config;
pub use errors::IndexError;
pub use harness::{Fallible, Is, Libtest, Mode, TestHost};
pub use output::{Capture, Output};
pub use source::{RecordedCall, SourceCache, SourceIndex};
pub use value::{Inspect, Nil, Shape};
