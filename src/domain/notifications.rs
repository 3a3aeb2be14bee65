//! Toast notification service.
//!
//! An explicit publish/subscribe object owned by the application: created at
//! start-up, handed to whoever needs to raise a toast, and shut down on exit.
//! Timing (entrance, auto dismiss, exit animation) is driven by the host
//! through [`NotificationService::mark_visible`],
//! [`NotificationService::begin_dismiss`] and [`NotificationService::remove`].

use std::fmt;

use tracing::{debug, trace};

/// Default time a toast stays on screen.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_500;
/// Delay before a freshly published toast becomes visible.
pub const TOAST_ENTER_DELAY_MS: u64 = 10;
/// Length of the exit animation before a dismissed toast is removed.
pub const TOAST_EXIT_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

/// What a caller asks to show.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
    /// Falls back to [`DEFAULT_TOAST_DURATION_MS`] when unset or zero.
    pub duration_ms: Option<u64>,
}

impl ToastRequest {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn success(title: &str) -> Self {
        Self {
            variant: ToastVariant::Success,
            ..Self::new(title)
        }
    }

    pub fn error(title: &str) -> Self {
        Self {
            variant: ToastVariant::Error,
            ..Self::new(title)
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub duration_ms: u64,
    pub phase: ToastPhase,
    pub published_at: u64,
}

impl Toast {
    /// Remaining life as a percentage, 100 when published, 0 at expiry.
    pub fn remaining_percent(&self, now: u64) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        let lived = now.saturating_sub(self.published_at).min(self.duration_ms);
        100.0 - lived as f64 * 100.0 / self.duration_ms as f64
    }

    /// Errors are announced assertively, everything else politely.
    pub fn is_alert(&self) -> bool {
        self.variant == ToastVariant::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Toast])>;

pub struct NotificationService {
    toasts: Vec<Toast>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_toast: u64,
    next_subscription: u64,
    default_duration_ms: u64,
    running: bool,
}

impl fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationService")
            .field("toasts", &self.toasts)
            .field("listeners", &self.listeners.len())
            .field("running", &self.running)
            .finish()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::start(DEFAULT_TOAST_DURATION_MS)
    }
}

impl NotificationService {
    pub fn start(default_duration_ms: u64) -> Self {
        debug!(default_duration_ms, "notification service started");
        Self {
            toasts: Vec::new(),
            listeners: Vec::new(),
            next_toast: 1,
            next_subscription: 1,
            default_duration_ms: if default_duration_ms == 0 {
                DEFAULT_TOAST_DURATION_MS
            } else {
                default_duration_ms
            },
            running: true,
        }
    }

    /// Drops every toast and listener. Later calls are no-ops.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.toasts.clear();
        self.listeners.clear();
        self.running = false;
        debug!("notification service shut down");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Registers a listener; it immediately receives the current snapshot.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&[Toast]) + 'static) -> Option<SubscriptionId> {
        if !self.running {
            return None;
        }
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        listener(&self.toasts);
        self.listeners.push((id, Box::new(listener)));
        Some(id)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        before != self.listeners.len()
    }

    /// Queues a toast and returns its id, or `None` once shut down.
    pub fn publish(&mut self, request: ToastRequest, now: u64) -> Option<ToastId> {
        if !self.running {
            return None;
        }
        let id = ToastId(self.next_toast);
        self.next_toast += 1;
        let duration_ms = match request.duration_ms {
            Some(ms) if ms > 0 => ms,
            _ => self.default_duration_ms,
        };
        self.toasts.push(Toast {
            id,
            title: request.title,
            description: request.description,
            variant: request.variant,
            duration_ms,
            phase: ToastPhase::Entering,
            published_at: now,
        });
        debug!(%id, duration_ms, "toast published");
        self.notify();
        Some(id)
    }

    /// Finishes the entrance animation.
    pub fn mark_visible(&mut self, id: ToastId) -> bool {
        self.set_phase(id, ToastPhase::Entering, ToastPhase::Visible)
    }

    /// Starts the exit animation. A toast already leaving is left alone.
    pub fn begin_dismiss(&mut self, id: ToastId) -> bool {
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if toast.phase == ToastPhase::Leaving {
            return false;
        }
        toast.phase = ToastPhase::Leaving;
        trace!(%id, "toast leaving");
        self.notify();
        true
    }

    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        if before == self.toasts.len() {
            return false;
        }
        trace!(%id, "toast removed");
        self.notify();
        true
    }

    /// Newest toast that is not already on its way out.
    pub fn newest_active(&self) -> Option<ToastId> {
        self.toasts
            .iter()
            .rev()
            .find(|t| t.phase != ToastPhase::Leaving)
            .map(|t| t.id)
    }

    fn set_phase(&mut self, id: ToastId, from: ToastPhase, to: ToastPhase) -> bool {
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id && t.phase == from) else {
            return false;
        };
        toast.phase = to;
        self.notify();
        true
    }

    fn notify(&mut self) {
        let snapshot = &self.toasts;
        for (_, listener) in &mut self.listeners {
            listener(snapshot);
        }
    }
}

impl Drop for NotificationService {
    fn drop(&mut self) {
        self.shutdown();
    }
}
