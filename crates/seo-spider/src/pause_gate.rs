//! The level-triggered "running?" signal every worker awaits (spec §5).

use tokio::sync::watch;

/// Clearing the gate pauses the pool at the next suspension point; setting it
/// resumes. `stop` sets the flag to `false` then the caller drops the handle,
/// after which any worker parked in [`PauseGate::wait_until_open`] observes
/// the closed sender and returns immediately so it can check the stop flag.
#[derive(Clone)]
pub struct PauseGate {
    tx: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct PauseGateWatcher {
    rx: watch::Receiver<bool>,
}

impl PauseGate {
    /// Creates a gate that starts open (running).
    pub fn new() -> (Self, PauseGateWatcher) {
        let (tx, rx) = watch::channel(true);
        (Self { tx }, PauseGateWatcher { rx })
    }

    /// Closes the gate; workers block at their next `wait_until_open`.
    pub fn pause(&self) {
        let _ = self.tx.send(false);
    }

    /// Opens the gate; parked workers resume.
    pub fn resume(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }
}

impl PauseGateWatcher {
    /// Blocks until the gate is open. Returns immediately if already open.
    pub async fn wait_until_open(&mut self) {
        while !*self.rx.borrow() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}
