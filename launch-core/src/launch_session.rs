use std::{collections::HashMap, time::Duration};

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    KeyValueStore, LaunchControl, LaunchEvent, LaunchOrchestrator, LaunchTimer, SessionPhase,
    Timers, Updater, WindowHost,
};

pub type LaunchEventSender = UnboundedSender<LaunchEvent>;
pub type LaunchEventReceiver = UnboundedReceiver<LaunchEvent>;

pub fn launch_channel() -> (LaunchEventSender, LaunchEventReceiver) {
    mpsc::unbounded_channel()
}

/// Timers backed by tokio sleeps that post `TimerFired` into the session
/// channel. Must be used from inside a tokio runtime.
#[derive(Debug)]
pub struct TokioTimers {
    events: LaunchEventSender,
    pending: HashMap<LaunchTimer, JoinHandle<()>>,
}

impl TokioTimers {
    pub fn new(events: LaunchEventSender) -> Self {
        Self {
            events,
            pending: HashMap::new(),
        }
    }
}

impl Timers for TokioTimers {
    fn schedule(&mut self, timer: LaunchTimer, delay: Duration) {
        self.cancel(timer);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(LaunchEvent::TimerFired(timer));
        });
        self.pending.insert(timer, handle);
    }

    fn cancel(&mut self, timer: LaunchTimer) {
        if let Some(handle) = self.pending.remove(&timer) {
            handle.abort();
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

/// Drives one launch session: creates the splash window, then feeds every
/// event to the orchestrator in arrival order until it asks to exit or all
/// senders are gone.
pub async fn run_session<H, U, K, T>(
    mut orchestrator: LaunchOrchestrator<H, U, K, T>,
    mut events: LaunchEventReceiver,
) -> SessionPhase
where
    H: WindowHost,
    U: Updater,
    K: KeyValueStore,
    T: Timers,
{
    if let Err(error) = orchestrator.start() {
        orchestrator.log(&format!("launch session aborted: {error}"));
        return orchestrator.phase();
    }

    while let Some(event) = events.recv().await {
        if orchestrator.handle(event) == LaunchControl::Exit {
            break;
        }
    }

    orchestrator.log(&format!(
        "launch session finished in phase {:?}",
        orchestrator.phase()
    ));
    orchestrator.phase()
}
