//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use is_harness::{Capture, Is, Mode, TestHost};

/// Host that records failures instead of failing the test.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    fails: Arc<AtomicUsize>,
    fail_nows: Arc<AtomicUsize>,
}

impl MockHost {
    pub fn fails(&self) -> usize {
        self.fails.load(Ordering::SeqCst)
    }

    pub fn fail_nows(&self) -> usize {
        self.fail_nows.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> bool {
        self.fails() + self.fail_nows() > 0
    }
}

impl TestHost for MockHost {
    fn fail(&self) {
        self.fails.fetch_add(1, Ordering::SeqCst);
    }

    fn fail_now(&self) {
        self.fail_nows.fetch_add(1, Ordering::SeqCst);
    }
}

/// Harness on a mock host writing uncolored output to a buffer.
pub fn harness(mode: Mode) -> (Is, MockHost, Capture) {
    let host = MockHost::default();
    let out = Capture::new();
    let is = Is::with_host(host.clone(), mode)
        .with_output(out.clone())
        .with_colorful(false);
    (is, host, out)
}

/// Fails on behalf of its caller without `#[track_caller]`: reports point here.
pub fn untracked_helper(is: &Is) {
    is.fail(); // inside the helper
}

/// Fails on behalf of its caller: reports point at the caller.
#[track_caller]
pub fn tracked_helper(is: &Is) {
    is.fail();
}
