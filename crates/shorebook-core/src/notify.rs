//! User-facing notifications.
//!
//! The booking controller reports outcomes through the [`Notifier`] trait so
//! it can be tested without a UI. The production implementation is
//! [`ToastQueue`], a fixed-duration auto-dismiss queue the frontend renders.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default time a toast stays on screen.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(5);

/// How many toasts may be visible at once. Older toasts are dropped first.
const MAX_VISIBLE_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastKind::Success => write!(f, "success"),
            ToastKind::Error => write!(f, "error"),
            ToastKind::Info => write!(f, "info"),
            ToastKind::Warning => write!(f, "warning"),
        }
    }
}

/// Fire-and-forget notification sink. Best-effort display, no delivery
/// guarantee.
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: ToastKind);
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

/// Auto-dismissing toast queue.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) {
        if self.toasts.len() >= MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            message: message.into(),
            kind,
            expires_at: Instant::now() + self.duration,
        });
    }

    /// Drop expired toasts. Called once per event-loop tick.
    pub fn prune(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Dismiss the oldest toast (the one at the top of the stack).
    pub fn dismiss_oldest(&mut self) {
        self.toasts.pop_front();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, message: &str, kind: ToastKind) {
        self.push(message, kind);
    }
}
