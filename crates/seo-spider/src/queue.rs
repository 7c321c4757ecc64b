//! The URL frontier and the visited-key/page-counter state it feeds.
//!
//! Exactly four things are mutable within one crawl (spec §5): the frontier
//! queue itself (an `mpsc` channel, a concurrency primitive with no outer
//! lock needed), the visited-key set, the page counter, and the pause gate
//! (`pause_gate.rs`). The visited set and counter share one [`tokio::sync::Mutex`]
//! so test-and-insert / test-and-increment stay atomic without ever spanning I/O.

use std::collections::HashSet;
use tokio::sync::{mpsc, Mutex};

/// The bounded FIFO queue of normalized URLs waiting to be fetched.
pub struct Frontier {
    tx: mpsc::Sender<String>,
}

pub struct FrontierReceiver {
    rx: mpsc::Receiver<String>,
}

impl Frontier {
    pub fn new(capacity: usize) -> (Self, FrontierReceiver) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, FrontierReceiver { rx })
    }

    /// Enqueues a URL. Silently drops it if the queue has been closed.
    pub async fn enqueue(&self, url: String) {
        let _ = self.tx.send(url).await;
    }
}

impl Clone for Frontier {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl FrontierReceiver {
    /// Dequeues the next URL, or `None` once every sender has dropped and the
    /// channel is drained — the signal that the crawl is done.
    pub async fn dequeue(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

/// The visited-key set and the monotonically non-decreasing page counter,
/// guarded by a single lock (spec §5).
#[derive(Default)]
struct VisitedInner {
    keys: HashSet<String>,
    pages_crawled: u32,
}

pub struct VisitedRegistry {
    inner: Mutex<VisitedInner>,
    max_pages: u32,
}

/// Outcome of attempting to claim a deduplication key for crawling.
#[derive(Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The key was unseen and the page cap allows one more record; claimed.
    Claimed,
    /// The key was already visited.
    AlreadyVisited,
    /// The page cap has been reached; the key was not inserted.
    CapReached,
}

impl VisitedRegistry {
    pub fn new(max_pages: u32) -> Self {
        Self {
            inner: Mutex::new(VisitedInner::default()),
            max_pages,
        }
    }

    /// Preloads the visited set from previously-saved Page Record URLs —
    /// used when resuming a stopped crawl (spec §4.5 state machine).
    pub async fn preload(&self, keys: impl IntoIterator<Item = String>) {
        let mut guard = self.inner.lock().await;
        guard.keys.extend(keys);
        guard.pages_crawled = guard.keys.len() as u32;
    }

    /// Tests the key against the visited set and the page cap; if unseen and
    /// under cap, inserts it and returns [`ClaimOutcome::Claimed`].
    ///
    /// The cap compares against `pages_crawled` (actual Page Records saved),
    /// not the visited-set size, since URLs later dropped for being
    /// off-domain, non-HTML, or robots-blocked must not count against it.
    pub async fn try_claim(&self, key: &str) -> ClaimOutcome {
        let mut guard = self.inner.lock().await;
        if guard.keys.contains(key) {
            return ClaimOutcome::AlreadyVisited;
        }
        if guard.pages_crawled >= self.max_pages {
            return ClaimOutcome::CapReached;
        }
        guard.keys.insert(key.to_string());
        ClaimOutcome::Claimed
    }

    /// Marks a key visited without counting it against the page cap check —
    /// used to suppress a second direct crawl of a redirect's final key.
    pub async fn mark_visited_only(&self, key: &str) {
        self.inner.lock().await.keys.insert(key.to_string());
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.lock().await.keys.contains(key)
    }

    /// Increments the page counter after a successful Store write.
    pub async fn record_page_saved(&self) -> u32 {
        let mut guard = self.inner.lock().await;
        guard.pages_crawled += 1;
        guard.pages_crawled
    }

    pub async fn pages_crawled(&self) -> u32 {
        self.inner.lock().await.pages_crawled
    }
}
