//! Process-wide crawl-id → running-engine registry (spec §9 Design Notes).
//!
//! Expressed as an explicit struct with its own lock, owned by the
//! application root and passed to both the HTTP surface and the
//! orchestrator — never as ambient global state.

use crate::pause_gate::PauseGate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A running crawl's external control surface: its pause gate and a
/// cooperative stop flag checked at every worker loop head.
pub struct EngineHandle {
    pub pause_gate: PauseGate,
    stopped: Arc<std::sync::atomic::AtomicBool>,
}

impl EngineHandle {
    pub fn new(pause_gate: PauseGate) -> Self {
        Self {
            pause_gate,
            stopped: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }

    /// Sets the stop flag then opens the gate so any paused worker wakes on
    /// the same `watch` signal a normal resume uses and observes the flag.
    pub fn stop(&self) {
        self.stopped.store(true, std::sync::atomic::Ordering::SeqCst);
        self.pause_gate.resume();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// Maps crawl id to its running [`EngineHandle`] so external control
/// operations (pause/resume/stop) can locate the engine.
#[derive(Default, Clone)]
pub struct EngineRegistry {
    engines: Arc<Mutex<HashMap<u64, Arc<EngineHandle>>>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserted on run start.
    pub async fn register(&self, crawl_id: u64, handle: Arc<EngineHandle>) {
        self.engines.lock().await.insert(crawl_id, handle);
    }

    /// Removed on run exit under every path (normal, failed, stopped).
    pub async fn deregister(&self, crawl_id: u64) {
        self.engines.lock().await.remove(&crawl_id);
    }

    pub async fn get(&self, crawl_id: u64) -> Option<Arc<EngineHandle>> {
        self.engines.lock().await.get(&crawl_id).cloned()
    }
}
