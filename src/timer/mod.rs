//! Timer core: scopes, the LIFO frame stack and activation dispatch
//!
//! A [`Timeprint`] can be entered as a scope (the returned [`Scope`] guard
//! reports when dropped), turned into a named timer, or used to wrap a
//! function. Every timer owns its own stack of open frames, so nested and
//! repeated use of the same timer reports each scope against its own start.

pub mod config;
pub mod timed;

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{debug, trace, warn};

pub use self::config::Config;
pub use self::timed::{Invoke, Timed};
use crate::error::TimeprintError;
use crate::report::message::render;
use crate::report::sink::Sink;

// ============================================================================
// TIMER
// ============================================================================

/// An open scope: who it belongs to and when it started.
#[derive(Debug)]
struct Frame {
    id: u64,
    label: Cow<'static, str>,
    start: Instant,
}

/// Timer usable as a scope guard, a named timer factory or a function wrapper.
///
/// Reports go to stderr, one line per finished scope, formatted by
/// [`format_message`](crate::report::format_message).
///
/// A timer may be entered again while already open. Each guard removes its
/// own frame, so a guard dropped out of order still reports against its own
/// start. Using one timer from several threads at once is
/// not supported: frames from different threads may pop out of order.
#[derive(Debug)]
pub struct Timeprint {
    label: Option<Cow<'static, str>>,
    stack: Mutex<Vec<Frame>>,
    next_id: AtomicU64,
    config: Arc<Config>,
    sink: Sink,
}

impl Default for Timeprint {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeprint {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_sink(config, Sink::Stderr)
    }

    pub(crate) fn with_sink(config: Config, sink: Sink) -> Self {
        Self {
            label: None,
            stack: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            config: Arc::new(config),
            sink,
        }
    }

    /// New timer with its own empty stack, sharing this timer's
    /// configuration. An absent or empty label keeps this timer's label.
    fn derive(&self, label: Option<Cow<'static, str>>) -> Timeprint {
        let label = label
            .filter(|label| !label.is_empty())
            .or_else(|| self.label.clone());
        Timeprint {
            label,
            stack: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            config: Arc::clone(&self.config),
            sink: self.sink.clone(),
        }
    }

    /// Timer reporting under `label`, usable as a scope or to wrap functions.
    pub fn named(&self, label: impl Into<Cow<'static, str>>) -> Timeprint {
        self.derive(Some(label.into()))
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of scopes currently open on this timer.
    pub fn depth(&self) -> usize {
        self.frames().len()
    }

    /// Start a timing scope that reports when the returned guard is dropped.
    pub fn enter(&self) -> Scope<'_> {
        let id = self.push();
        Scope {
            timer: Handle::Borrowed(self),
            id,
        }
    }

    /// Like [`enter`](Self::enter), but the guard owns the timer.
    pub fn into_scope(self) -> Scope<'static> {
        let id = self.push();
        Scope {
            timer: Handle::Owned(self),
            id,
        }
    }

    /// Run `f` inside a timing scope and return its result.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let _scope = self.enter();
        f()
    }

    /// Wrap `func` so every call is timed.
    ///
    /// Reports use this timer's label if it has one, otherwise the name of
    /// the function. Callables without a usable name, such as function
    /// pointers or boxed closures, report under the default label.
    pub fn decorate<F>(&self, func: F) -> Timed<F> {
        let name = timed::function_name::<F>().map(Cow::Owned);
        let timer = self.derive(self.label.clone().or(name));
        Timed::new(func, timer)
    }

    /// Single entry point for every activation form.
    ///
    /// * no argument: a new timer, to enter or to decorate with
    /// * a label: a new timer with that label
    /// * a callable: the callable wrapped by [`decorate`](Self::decorate)
    ///
    /// More than one argument is rejected with
    /// [`TimeprintError::InvalidActivation`]. Arguments past the second are
    /// never pulled from the iterator.
    pub fn call<F, I>(&self, args: I) -> Result<Activated<F>, TimeprintError>
    where
        I: IntoIterator<Item = Arg<F>>,
    {
        let mut args = args.into_iter();
        let first = args.next();
        if args.next().is_some() {
            let count = match args.size_hint() {
                (lower, Some(upper)) if lower == upper => Some(lower + 2),
                _ => None,
            };
            return Err(TimeprintError::InvalidActivation { count });
        }

        Ok(match first {
            None => Activated::Context(self.derive(None)),
            Some(Arg::Label(label)) => Activated::Context(self.derive(Some(label))),
            Some(Arg::Callable(func)) => Activated::Decorated(self.decorate(func)),
        })
    }

    fn frames(&self) -> MutexGuard<'_, Vec<Frame>> {
        // Frames stay consistent even if a holder panicked.
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self) -> u64 {
        let label = match &self.label {
            Some(label) => label.clone(),
            None => Cow::Owned(self.config.default_label.clone()),
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut frames = self.frames();
        trace!(label = %label, depth = frames.len() + 1, "timing scope entered");
        frames.push(Frame {
            id,
            label,
            start: Instant::now(),
        });
        id
    }

    /// Remove the frame pushed as `id`. In nested use that is the top frame.
    fn pop(&self, id: u64) {
        let now = Instant::now();
        let mut frames = self.frames();
        let Some(index) = frames.iter().rposition(|frame| frame.id == id) else {
            return;
        };
        let Frame { label, start, .. } = frames.remove(index);
        drop(frames);
        let seconds = now.duration_since(start).as_secs_f64();
        debug!(label = %label, seconds, "timing scope finished");

        if !self.config.enabled {
            return;
        }
        let line = render(&label, seconds, self.config.color);
        if let Err(err) = self.sink.write_line(&line) {
            warn!(error = %err, "failed to write timing report");
        }
    }
}

// ============================================================================
// SCOPE GUARD
// ============================================================================

#[derive(Debug)]
enum Handle<'a> {
    Borrowed(&'a Timeprint),
    Owned(Timeprint),
}

impl Deref for Handle<'_> {
    type Target = Timeprint;

    fn deref(&self) -> &Timeprint {
        match self {
            Handle::Borrowed(timer) => timer,
            Handle::Owned(timer) => timer,
        }
    }
}

/// Open timing scope. Dropping it, including during a panic, pops the frame
/// and writes the report.
#[derive(Debug)]
#[must_use = "the scope reports as soon as it is dropped"]
pub struct Scope<'a> {
    timer: Handle<'a>,
    id: u64,
}

impl Scope<'_> {
    pub fn timer(&self) -> &Timeprint {
        &self.timer
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.timer.pop(self.id);
    }
}

// ============================================================================
// ACTIVATION
// ============================================================================

/// One argument to [`Timeprint::call`].
pub enum Arg<F> {
    Label(Cow<'static, str>),
    Callable(F),
}

impl<F> From<&'static str> for Arg<F> {
    fn from(label: &'static str) -> Self {
        Arg::Label(Cow::Borrowed(label))
    }
}

impl<F> From<String> for Arg<F> {
    fn from(label: String) -> Self {
        Arg::Label(Cow::Owned(label))
    }
}

/// Result of [`Timeprint::call`].
pub enum Activated<F> {
    Context(Timeprint),
    Decorated(Timed<F>),
}

impl<F> Activated<F> {
    pub fn into_context(self) -> Option<Timeprint> {
        match self {
            Activated::Context(timer) => Some(timer),
            Activated::Decorated(_) => None,
        }
    }

    pub fn into_decorated(self) -> Option<Timed<F>> {
        match self {
            Activated::Decorated(timed) => Some(timed),
            Activated::Context(_) => None,
        }
    }
}

impl<F> fmt::Debug for Activated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activated::Context(timer) => f.debug_tuple("Context").field(timer).finish(),
            Activated::Decorated(timed) => f.debug_tuple("Decorated").field(timed).finish(),
        }
    }
}
