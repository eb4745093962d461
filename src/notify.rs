//! Transient success/error feedback.
//!
//! At most one toast exists at a time: showing a new one replaces the current
//! toast immediately, without queuing. The toast is published as state on a
//! `watch` channel; renderers subscribe and redraw on every change.
//!
//! Lifecycle, measured from the show call: `Entering`, `Visible` after [`SHOW_DELAY`],
//! `Leaving` at [`DISPLAY_DURATION`], removed [`EXIT_DURATION`] after that.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const SHOW_DELAY: Duration = Duration::from_millis(10);
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// Anything other than `"success"` presents as an error.
    pub fn from_type(s: &str) -> Self {
        if s == "success" { ToastKind::Success } else { ToastKind::Error }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Error => "fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

/// Sink for user-facing notifications.
pub trait Notify: Send + Sync {
    fn show_toast(&self, message: &str, kind: ToastKind);
}

struct Inner {
    state: watch::Sender<Option<Toast>>,
    next_id: AtomicU64,
    timer: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    // Stale timers from a preempted toast see a different id and do nothing.
    fn transition(&self, id: u64, phase: Option<ToastPhase>) {
        self.state.send_if_modified(|cur| {
            let current = cur.as_ref().map(|t| t.id == id).unwrap_or(false);
            if !current { return false; }
            match phase {
                Some(p) => {
                    if let Some(t) = cur.as_mut() { t.phase = p; }
                }
                None => *cur = None,
            }
            true
        });
    }
}

#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                state: tx,
                next_id: AtomicU64::new(1),
                timer: parking_lot::Mutex::new(None),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Toast>> { self.inner.state.subscribe() }

    pub fn current(&self) -> Option<Toast> { self.inner.state.borrow().clone() }

    /// Show a toast, removing any toast already on screen. Timers need a tokio runtime.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let message = message.into();
        if let Some(prev) = self.inner.timer.lock().take() {
            prev.abort();
        }
        debug!(target: "mira::notify", id, kind = kind.as_str(), %message, "toast");
        self.inner.state.send_replace(Some(Toast { id, message, kind, phase: ToastPhase::Entering }));

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => {
                warn!(target: "mira::notify", id, "no async runtime; toast will not auto-dismiss");
                return id;
            }
        };
        let inner = Arc::clone(&self.inner);
        let task = handle.spawn(async move {
            tokio::time::sleep(SHOW_DELAY).await;
            inner.transition(id, Some(ToastPhase::Visible));
            tokio::time::sleep(DISPLAY_DURATION - SHOW_DELAY).await;
            inner.transition(id, Some(ToastPhase::Leaving));
            tokio::time::sleep(EXIT_DURATION).await;
            inner.transition(id, None);
        });
        *self.inner.timer.lock() = Some(task);
        id
    }

    /// Untyped entry point: `kind` is matched against `"success"`, everything else is an error.
    pub fn show_typed(&self, message: impl Into<String>, kind: &str) -> u64 {
        self.show(message, ToastKind::from_type(kind))
    }

    /// Remove the current toast at once.
    pub fn dismiss(&self) {
        if let Some(prev) = self.inner.timer.lock().take() {
            prev.abort();
        }
        self.inner.state.send_replace(None);
    }
}

impl Default for Notifier {
    fn default() -> Self { Self::new() }
}

impl Notify for Notifier {
    fn show_toast(&self, message: &str, kind: ToastKind) {
        self.show(message, kind);
    }
}
