//! The test harness and its assertion vocabulary.
//!
//! ```no_run
//! use is_harness::Is;
//!
//! let is = Is::new();
//! let signed_in = true;
//! is.equal(signed_in, true); // must be signed in
//! is.that(1 + 1 == 2);
//! ```
//!
//! A failing assertion prints something like:
//!
//! ```text
//!     my_test.rs:8: signed_in(false) != true // must be signed in
//! ```
//!
//! ## Modes
//!
//! - [`Mode::Strict`] aborts the test at the first failure ([`TestHost::fail_now`]).
//! - [`Mode::Relaxed`] marks the test failed and keeps going ([`TestHost::fail`]).

use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::callsite::CallSite;
use crate::config::Config;
use crate::output::Output;
use crate::report::{self, COLOR_NORMAL, COLOR_TYPE};
use crate::source::SourceCache;
use crate::value::{Inspect, Inspected, equal_inspected, render_pair};

/// Source file of this module, as `file!()` and `Location::file()` spell it.
pub(crate) const SOURCE_FILE: &str = file!();

// ============================================================================
// Host test runner contract
// ============================================================================

/// How failures reach the test runner.
pub trait TestHost {
    /// Mark the test failed and let it continue. Called in relaxed mode.
    fn fail(&self);

    /// Mark the test failed and stop it. Called in strict mode.
    fn fail_now(&self);
}

macro_rules! forward_host {
    ($($ptr:ty),+) => {
        $(
            impl<H: TestHost + ?Sized> TestHost for $ptr {
                fn fail(&self) {
                    (**self).fail()
                }

                fn fail_now(&self) {
                    (**self).fail_now()
                }
            }
        )+
    };
}

forward_host!(&H, Box<H>, Rc<H>, Arc<H>);

/// The built-in libtest host.
///
/// `fail_now` panics, which is how libtest fails a test. `fail` counts the failure; when
/// the host is dropped at the end of the test with failures recorded, it panics then.
#[derive(Debug, Default)]
pub struct Libtest {
    failures: AtomicUsize,
}

impl Libtest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

impl TestHost for Libtest {
    fn fail(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    fn fail_now(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        panic!("assertion failed (details above)");
    }
}

impl Drop for Libtest {
    fn drop(&mut self) {
        let failures = self.failures();
        if failures > 0 && !std::thread::panicking() {
            panic!("{failures} assertion(s) failed (details above)");
        }
    }
}

/// Failure strategy, fixed for a harness's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Strict,
    Relaxed,
}

// ============================================================================
// Error-like values for `no_err`
// ============================================================================

/// A value that may carry an error.
pub trait Fallible {
    /// The error's message, or `None` when there is no error.
    fn error_text(&self) -> Option<String>;
}

impl<T, E: Display> Fallible for Result<T, E> {
    fn error_text(&self) -> Option<String> {
        self.as_ref().err().map(ToString::to_string)
    }
}

impl<E: Display> Fallible for Option<E> {
    fn error_text(&self) -> Option<String> {
        self.as_ref().map(ToString::to_string)
    }
}

impl Fallible for std::io::Error {
    fn error_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Fallible for Box<dyn std::error::Error> {
    fn error_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Fallible for Box<dyn std::error::Error + Send + Sync> {
    fn error_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<F: Fallible + ?Sized> Fallible for &F {
    fn error_text(&self) -> Option<String> {
        (**self).error_text()
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Test helper harness. Create one per test with [`Is::new`] or [`Is::relaxed`].
pub struct Is {
    host: Box<dyn TestHost>,
    mode: Mode,
    config: Config,
    cache: &'static SourceCache,
}

impl Default for Is {
    fn default() -> Self {
        Self::new()
    }
}

impl Is {
    /// Strict harness on libtest: the first failure aborts the test.
    pub fn new() -> Self {
        Self::with_host(Libtest::new(), Mode::Strict)
    }

    /// Relaxed harness on libtest: every failure is reported, the test fails at the end.
    pub fn relaxed() -> Self {
        Self::with_host(Libtest::new(), Mode::Relaxed)
    }

    /// Harness reporting to a custom host.
    pub fn with_host(host: impl TestHost + 'static, mode: Mode) -> Self {
        Self {
            host: Box::new(host),
            mode,
            config: Config::from_env(),
            cache: SourceCache::global(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_output(mut self, output: impl Into<Output>) -> Self {
        self.config.output = output.into();
        self
    }

    pub fn with_colorful(mut self, colorful: bool) -> Self {
        self.config.colorful = colorful;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Strict libtest harness for a nested scope, sharing this harness's configuration.
    ///
    /// The child always reports to a fresh [`Libtest`] host, whatever this harness's host
    /// is. Use [`Is::child_with_host`] to keep failures on a custom host.
    pub fn child(&self) -> Is {
        Is::new().with_config(self.config.clone())
    }

    /// Relaxed libtest harness for a nested scope, sharing this harness's configuration.
    ///
    /// Like [`Is::child`], the child reports to a fresh [`Libtest`] host.
    pub fn child_relaxed(&self) -> Is {
        Is::relaxed().with_config(self.config.clone())
    }

    /// Harness for a nested scope on `host`, sharing this harness's configuration.
    pub fn child_with_host(&self, host: impl TestHost + 'static, mode: Mode) -> Is {
        Is::with_host(host, mode).with_config(self.config.clone())
    }

    /// Fail unconditionally.
    ///
    /// ```no_run
    /// # let is = is_harness::Is::new();
    /// is.fail(); // TODO: write this test
    /// ```
    #[track_caller]
    pub fn fail(&self) {
        self.log(CallSite::resolve().as_ref(), "failed");
    }

    /// Assert that `condition` holds. The condition's source is shown on failure:
    ///
    /// ```text
    /// my_test.rs:12: not true: val.is_some() // val should never be empty
    /// ```
    #[track_caller]
    pub fn that(&self, condition: bool) {
        if condition {
            return;
        }
        let site = CallSite::resolve();
        let args = site
            .as_ref()
            .and_then(|site| self.cache.resolve_call_line(&site.file, site.line));
        let message = report::expand_args(&format!("not true: {}", report::ARGS), args.as_deref());
        self.log(site.as_ref(), &message);
    }

    /// Assert that `a` and `b` are equal (see [`crate::value::equal`]).
    ///
    /// ```text
    /// my_test.rs:12: greeting(Hey Mat) != Hi Mat // greeting
    /// ```
    ///
    /// Values of different types are never equal, and an unsuffixed integer literal is an
    /// `i32`. `is.equal(v.len(), 3)` therefore fails with `usize(3) != i32(3)`; write
    /// `3usize`. All string types (`&str`, `String`, `Cow<str>`, ...) count as one type.
    #[track_caller]
    pub fn equal<A: Inspect, B: Inspect>(&self, a: A, b: B) {
        let (a, b) = (Inspected::of(&a), Inspected::of(&b));
        if equal_inspected(&a, &b) {
            return;
        }

        let site = CallSite::resolve();
        let call = site.as_ref().and_then(|site| self.cache.call_at(&site.file, site.line));
        let name = |index: usize| call.as_ref().and_then(|call| call.arg(index));

        let (a_value, b_value) = render_pair(&a, &b);
        let colorful = self.config.colorful;
        let message = format!(
            "{} != {}",
            report::label(name(0), &a_value, colorful),
            report::label(name(1), &b_value, colorful)
        );
        self.log(site.as_ref(), &message);
    }

    /// Assert that `result` carries no error.
    ///
    /// When the argument is a variable, the statement that assigned it is shown:
    ///
    /// ```text
    /// my_test.rs:12: error: not found(let val = get_val()) // get_val error
    /// ```
    #[track_caller]
    pub fn no_err<F: Fallible>(&self, result: F) {
        let Some(err) = result.error_text() else {
            return;
        };

        let site = CallSite::resolve();
        let call = site.as_ref().and_then(|site| self.cache.call_at(&site.file, site.line));
        let source = call.and_then(|call| call.declaration.clone().or_else(|| call.arg(0).map(str::to_string)));

        let message = match source {
            Some(source) if self.config.colorful => format!("error: {err}{COLOR_TYPE}({source}){COLOR_NORMAL}"),
            Some(source) => format!("error: {err}({source})"),
            None => err,
        };
        self.log(site.as_ref(), &message);
    }

    fn log(&self, site: Option<&CallSite>, message: &str) {
        tracing::debug!(
            file = site.map(|site| site.file.as_str()),
            line = site.map(|site| site.line),
            mode = ?self.mode,
            "assertion failed"
        );
        let text = report::report(site, message, self.cache, self.config.colorful);
        self.config.output.write_str(&text);
        match self.mode {
            Mode::Strict => self.host.fail_now(),
            Mode::Relaxed => self.host.fail(),
        }
    }
}
