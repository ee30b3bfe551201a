//! Usage-error reporting.
//!
//! Checked view operations never unwind on misuse. They hand the error to
//! a sink and return a harmless value. The sink is resolved in this order:
//!
//! 1. the innermost [`Redirect`] active on the current thread,
//! 2. the process-wide sink installed with [`set_sink`],
//! 3. the built-in sink selected by [`crate::config::policy`].
use crate::config::{policy, ReportPolicy};
use crate::error::Error;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

/// Receiver of usage errors.
///
/// `op` names the operation that failed, e.g. `ArrayView::slice`.
pub trait ErrorSink: Send + Sync {
    fn report(&self, op: &'static str, err: &Error);
}

/// Sends every error to `log::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    #[inline]
    fn report(&self, op: &'static str, err: &Error) {
        log::error!("{}(): {}", op, err);
    }
}

/// Panics on the first error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicSink;

impl ErrorSink for PanicSink {
    #[inline]
    fn report(&self, op: &'static str, err: &Error) {
        panic!("{}(): {}", op, err);
    }
}

/// Discards every error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl ErrorSink for SilentSink {
    #[inline]
    fn report(&self, _op: &'static str, _err: &Error) {}
}

/// Accumulates formatted messages, one per reported error.
#[derive(Debug, Default)]
pub struct CollectSink {
    messages: Mutex<Vec<String>>,
}

impl CollectSink {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of collected messages.
    #[inline]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Drains collected messages.
    #[inline]
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// All messages concatenated, each terminated by a newline.
    pub fn output(&self) -> String {
        let messages = self.messages.lock();
        let mut out = String::new();
        for m in messages.iter() {
            out.push_str(m);
            out.push('\n');
        }
        out
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl ErrorSink for CollectSink {
    fn report(&self, op: &'static str, err: &Error) {
        self.messages.lock().push(format!("{}(): {}", op, err));
    }
}

static GLOBAL_SINK: Lazy<RwLock<Option<Arc<dyn ErrorSink>>>> = Lazy::new(|| RwLock::new(None));

thread_local! {
    static REDIRECT: RefCell<Option<Arc<dyn ErrorSink>>> = RefCell::new(None);
}

/// Install a process-wide sink, returning the previous one.
#[inline]
pub fn set_sink(sink: Arc<dyn ErrorSink>) -> Option<Arc<dyn ErrorSink>> {
    GLOBAL_SINK.write().replace(sink)
}

/// Remove the process-wide sink, falling back to the configured policy.
#[inline]
pub fn reset_sink() -> Option<Arc<dyn ErrorSink>> {
    GLOBAL_SINK.write().take()
}

/// Scoped redirection of usage errors on the current thread.
///
/// The previous redirect, if any, is restored when the guard is dropped,
/// so redirects nest.
#[must_use = "errors are only redirected while the guard is alive"]
pub struct Redirect {
    prev: Option<Arc<dyn ErrorSink>>,
    // restoring on another thread would corrupt both threads' state.
    _not_send: PhantomData<*const ()>,
}

impl Redirect {
    pub fn new(sink: Arc<dyn ErrorSink>) -> Self {
        let prev = REDIRECT.with(|r| r.borrow_mut().replace(sink));
        Redirect {
            prev,
            _not_send: PhantomData,
        }
    }

    /// Redirect into a fresh [`CollectSink`] and return it along with the guard.
    pub fn collect() -> (Self, Arc<CollectSink>) {
        let sink = Arc::new(CollectSink::new());
        (Redirect::new(sink.clone()), sink)
    }
}

impl Drop for Redirect {
    #[inline]
    fn drop(&mut self) {
        let prev = self.prev.take();
        REDIRECT.with(|r| *r.borrow_mut() = prev);
    }
}

/// Report a usage error of operation `op`.
pub fn report(op: &'static str, err: &Error) {
    // Sinks are cloned out so no borrow or lock is held while user code runs.
    if let Some(sink) = REDIRECT.with(|r| r.borrow().clone()) {
        sink.report(op, err);
        return;
    }
    let global = GLOBAL_SINK.read().clone();
    if let Some(sink) = global {
        sink.report(op, err);
        return;
    }
    match policy() {
        ReportPolicy::Log => LogSink.report(op, err),
        ReportPolicy::Panic => PanicSink.report(op, err),
        ReportPolicy::Silent => SilentSink.report(op, err),
    }
}
