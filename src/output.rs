//! Output sinks for failure messages.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Where a harness writes its failure messages.
#[derive(Clone, Default)]
pub enum Output {
    /// Standard output through `print!`, so libtest captures it per test.
    #[default]
    Stdout,
    /// Standard error through `eprint!`.
    Stderr,
    /// An in-memory buffer that can be read back.
    Buffer(Capture),
    /// Any shared writer.
    Writer(Arc<Mutex<dyn Write + Send>>),
}

impl Output {
    /// Append `text`. Write errors are ignored: a failure report must never fail.
    pub fn write_str(&self, text: &str) {
        match self {
            Output::Stdout => print!("{text}"),
            Output::Stderr => eprint!("{text}"),
            Output::Buffer(capture) => capture.push(text),
            Output::Writer(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = writer.write_all(text.as_bytes());
                let _ = writer.flush();
            }
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => write!(f, "Stdout"),
            Output::Stderr => write!(f, "Stderr"),
            Output::Buffer(capture) => f.debug_tuple("Buffer").field(capture).finish(),
            Output::Writer(_) => write!(f, "Writer(..)"),
        }
    }
}

/// Shared, cloneable text buffer.
#[derive(Debug, Clone, Default)]
pub struct Capture(Arc<Mutex<String>>);

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn push(&self, text: &str) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push_str(text);
    }
}

impl From<Capture> for Output {
    fn from(capture: Capture) -> Self {
        Output::Buffer(capture)
    }
}
