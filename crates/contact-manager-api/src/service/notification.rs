use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient status message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Default)]
struct TimerState {
    current: Option<Notification>,
    pending: Option<JoinHandle<()>>,
    disposed: bool,
    last_id: u64,
}

struct Inner {
    duration: Duration,
    state: Mutex<TimerState>,
}

/// Holds at most one notification and clears it once its duration elapsed.
///
/// Raising a new notification replaces the current one and restarts the timeout.
/// The timer belongs to a single view. Dropping it, or calling
/// [`NotificationTimer::dispose`], cancels the pending timeout.
pub struct NotificationTimer {
    inner: Arc<Inner>,
}

/// Non-owning handle used by settlements that may outlive the requesting view
#[derive(Clone)]
pub struct WeakNotificationTimer {
    inner: Weak<Inner>,
}

impl NotificationTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                duration,
                state: Mutex::new(TimerState::default()),
            }),
        }
    }

    pub fn duration(&self) -> Duration {
        self.inner.duration
    }

    pub fn raise(&self, kind: NotificationKind, message: impl Into<String>) {
        self.inner.raise(kind, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.raise(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.raise(NotificationKind::Error, message);
    }

    /// The active notification, if it hasn't expired yet
    pub fn current(&self) -> Option<Notification> {
        let state = self.inner.lock();
        state
            .current
            .clone()
            .filter(|n| n.expires_at > Instant::now())
    }

    pub fn downgrade(&self) -> WeakNotificationTimer {
        WeakNotificationTimer {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Cancels the pending timeout and ignores all further notifications
    pub fn dispose(&self) {
        let mut state = self.inner.lock();
        state.disposed = true;
        state.current = None;
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }
}

impl WeakNotificationTimer {
    /// Raises the notification if the owning view is still alive
    pub fn raise(&self, kind: NotificationKind, message: impl Into<String>) {
        match self.inner.upgrade() {
            Some(inner) => inner.raise(kind, message.into()),
            None => debug!("notification timer was dropped, skipping notification"),
        }
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn raise(self: &Arc<Self>, kind: NotificationKind, message: String) {
        let mut state = self.lock();
        if state.disposed {
            debug!("notification timer was disposed, skipping notification: {message}");
            return;
        }
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }

        state.last_id += 1;
        let id = state.last_id;
        let expires_at = Instant::now() + self.duration;
        state.current = Some(Notification {
            id,
            kind,
            message,
            expires_at,
        });

        // the timeout only holds a weak reference, so it never keeps a dropped timer alive
        let timer = Arc::downgrade(self);
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            if let Some(inner) = timer.upgrade() {
                inner.expire(id);
            }
        }));
    }

    fn expire(&self, id: u64) {
        let mut state = self.lock();
        if state.current.as_ref().is_some_and(|n| n.id == id) {
            state.current = None;
            state.pending = None;
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
    }
}
