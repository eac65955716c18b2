//! One-shot fetch of the event snapshot, tied to the dashboard's lifetime.
//!
//! `mount` starts exactly one read; `unmount` (or dropping the controller)
//! aborts it. A result that races with `unmount` is dropped under the same
//! lock that flips the mounted flag, so state never changes after teardown.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

use crate::access::EventAccess;
use crate::domain::events::HoneypotEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Loaded(Vec<HoneypotEvent>),
    Failed(String),
}

impl FetchState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, FetchState::Loading)
    }

    /// Rows to show; empty unless loaded.
    pub fn events(&self) -> &[HoneypotEvent] {
        match self {
            FetchState::Loaded(events) => events,
            _ => &[],
        }
    }
}

pub struct FetchController {
    access: EventAccess,
    state: Arc<watch::Sender<FetchState>>,
    mounted: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
    started: bool,
}

impl FetchController {
    pub fn new(access: EventAccess) -> Self {
        let (state, _) = watch::channel(FetchState::Loading);
        Self {
            access,
            state: Arc::new(state),
            mounted: Arc::new(AtomicBool::new(false)),
            task: None,
            started: false,
        }
    }

    /// Spawns the read. Must run inside a tokio runtime; later calls are no-ops.
    pub fn mount(&mut self) {
        if self.started {
            debug!("fetch controller already mounted");
            return;
        }
        self.started = true;
        self.mounted.store(true, Ordering::SeqCst);

        let access = self.access.clone();
        let state = Arc::clone(&self.state);
        let mounted = Arc::clone(&self.mounted);

        self.task = Some(tokio::spawn(async move {
            let next = match access.list_events().await {
                Ok(events) => FetchState::Loaded(events),
                // Already logged by the access layer.
                Err(e) => FetchState::Failed(e.to_string()),
            };

            let applied = state.send_if_modified(|current| {
                if mounted.load(Ordering::SeqCst) {
                    *current = next;
                    true
                } else {
                    false
                }
            });
            if !applied {
                debug!("discarding fetch result that arrived after unmount");
            }
        }));
    }

    pub fn unmount(&mut self) {
        // Taking the channel lock orders this against a finishing fetch.
        self.state.send_if_modified(|_| {
            self.mounted.store(false, Ordering::SeqCst);
            false
        });

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Resolves with the first settled state, or the current state if no
    /// fetch is in flight.
    pub async fn wait_settled(&self) -> FetchState {
        if !self.is_mounted() {
            return self.state();
        }

        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(FetchState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

impl Drop for FetchController {
    fn drop(&mut self) {
        self.unmount();
    }
}
