//! Browser history synchronization.
//!
//! The player mirrors the current slide into the browser's navigation
//! history so the back/forward buttons walk through slides. The browser
//! itself is behind the [`HistoryBackend`] trait; the host page supplies
//! an implementation wired to `history.replaceState`/`pushState`, tests
//! supply a recording one.
//!
//! History writes and history-change handling would otherwise feed back
//! into each other ("slide changed → push entry" versus "entry popped →
//! slide changed"). The [`HistoryLock`] breaks the loop: the handler for
//! browser-driven changes applies the slide assignment while holding the
//! lock, and the push binding does nothing while it is held. The lock is
//! released on guard drop, so an early return or panic inside the
//! handler cannot leave it stuck.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// The state payload stored with every history entry.
///
/// Serialized as a JSON string; the wire shape is `{"slideId": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Hierarchical number or stable id of the slide.
    #[serde(rename = "slideId")]
    pub slide_id: String,
}

impl HistoryState {
    /// Serialize to the wire string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a wire string; malformed input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Interface to the browser's session history.
pub trait HistoryBackend: Send + Sync {
    /// Replace the current history entry (no back-button entry).
    fn replace_state(&self, state: &str, url: &str);

    /// Push a new history entry (creates a back-button entry).
    fn push_state(&self, state: &str, url: &str);
}

/// A backend that drops everything, for embedded players.
#[derive(Debug, Default)]
pub struct NullHistory;

impl HistoryBackend for NullHistory {
    fn replace_state(&self, _state: &str, _url: &str) {}
    fn push_state(&self, _state: &str, _url: &str) {}
}

/// Re-entrancy guard between history writes and history-change handling.
#[derive(Debug, Clone, Default)]
pub(crate) struct HistoryLock {
    held: Arc<AtomicBool>,
}

impl HistoryLock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock; it is released when the guard drops.
    pub(crate) fn acquire(&self) -> HistoryLockGuard {
        self.held.store(true, Ordering::SeqCst);
        HistoryLockGuard {
            held: Arc::clone(&self.held),
        }
    }

    pub(crate) fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}

pub(crate) struct HistoryLockGuard {
    held: Arc<AtomicBool>,
}

impl Drop for HistoryLockGuard {
    fn drop(&mut self) {
        self.held.store(false, Ordering::SeqCst);
    }
}
