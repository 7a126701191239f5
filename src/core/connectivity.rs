//! Online/offline tracking. Display only: ledger operations never consult it.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    Online,
    Offline,
}

impl ConnectivityState {
    pub fn from_online(online: bool) -> Self {
        if online {
            ConnectivityState::Online
        } else {
            ConnectivityState::Offline
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityState::Online)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectivityState::Online => "Online",
            ConnectivityState::Offline => "Offline",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type ConnectivityListener = Box<dyn Fn(ConnectivityState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wraps a signal-specific handle.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Source of online/offline notifications.
pub trait ConnectivitySignal: Send + Sync {
    fn current(&self) -> ConnectivityState;
    fn subscribe(&self, listener: ConnectivityListener) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

type SharedListener = Arc<dyn Fn(ConnectivityState) + Send + Sync>;

/// In-process signal: whoever owns it reports changes through [`set`](Self::set),
/// and subscribers hear about every transition.
pub struct ConnectivityNotifier {
    state: Mutex<ConnectivityState>,
    listeners: Mutex<Vec<(SubscriptionId, SharedListener)>>,
    next_id: AtomicU64,
}

impl ConnectivityNotifier {
    pub fn new(initial: ConnectivityState) -> Self {
        Self {
            state: Mutex::new(initial),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Records a new state and notifies subscribers when it differs from the
    /// previous one.
    pub fn set(&self, next: ConnectivityState) {
        {
            let mut state = self.state.lock().expect("connectivity lock poisoned");
            if *state == next {
                return;
            }
            *state = next;
        }
        tracing::info!(state = %next, "connectivity changed");
        let listeners: Vec<SharedListener> = self
            .listeners
            .lock()
            .expect("connectivity listeners lock poisoned")
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(next);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .lock()
            .expect("connectivity listeners lock poisoned")
            .len()
    }
}

impl ConnectivitySignal for ConnectivityNotifier {
    fn current(&self) -> ConnectivityState {
        *self.state.lock().expect("connectivity lock poisoned")
    }

    fn subscribe(&self, listener: ConnectivityListener) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .expect("connectivity listeners lock poisoned")
            .push((id, Arc::from(listener)));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .expect("connectivity listeners lock poisoned")
            .retain(|(existing, _)| *existing != id);
    }
}

/// Mirrors a [`ConnectivitySignal`] for as long as it lives; the subscription
/// is released on drop.
pub struct ConnectivityMonitor {
    online: Arc<AtomicBool>,
    signal: Arc<dyn ConnectivitySignal>,
    subscription: SubscriptionId,
}

impl ConnectivityMonitor {
    pub fn new(signal: Arc<dyn ConnectivitySignal>) -> Self {
        let online = Arc::new(AtomicBool::new(true));
        let shared = Arc::clone(&online);
        let subscription = signal.subscribe(Box::new(move |state| {
            shared.store(state.is_online(), Ordering::SeqCst);
        }));
        online.store(signal.current().is_online(), Ordering::SeqCst);
        Self {
            online,
            signal,
            subscription,
        }
    }

    pub fn state(&self) -> ConnectivityState {
        ConnectivityState::from_online(self.online.load(Ordering::SeqCst))
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.signal.unsubscribe(self.subscription);
    }
}
