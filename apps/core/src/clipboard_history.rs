use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{ClipboardItem, ClipboardKind};

pub const DEFAULT_CLIPBOARD_CAPACITY: usize = 50;

/// Bounded, newest-first buffer of copied text.
///
/// All mutation goes through one lock so a push and its eviction are a
/// single step; [`ClipboardHistory::snapshot`] copies under the same lock.
#[derive(Debug)]
pub struct ClipboardHistory {
    capacity: usize,
    state: Mutex<HistoryState>,
}

#[derive(Debug, Default)]
struct HistoryState {
    entries: VecDeque<ClipboardItem>,
    last_observed: Option<String>,
    next_seq: u64,
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CLIPBOARD_CAPACITY)
    }
}

impl ClipboardHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(HistoryState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Records `current_text` as already seen without capturing it.
    pub fn observe_baseline(&self, current_text: &str) {
        self.lock().last_observed = Some(current_text.to_string());
    }

    /// Captures `current_text` if it differs from the last observed value and
    /// is not blank.
    pub fn detect_change(&self, current_text: &str) -> Option<ClipboardItem> {
        let mut state = self.lock();
        if state.last_observed.as_deref() == Some(current_text) || current_text.trim().is_empty() {
            return None;
        }
        state.last_observed = Some(current_text.to_string());
        Some(self.push_locked(&mut state, current_text))
    }

    /// Explicit insertion. Repeating the newest content is allowed.
    pub fn push_front(&self, content: &str) -> ClipboardItem {
        let mut state = self.lock();
        state.last_observed = Some(content.to_string());
        self.push_locked(&mut state, content)
    }

    pub fn snapshot(&self) -> Vec<ClipboardItem> {
        self.lock().entries.iter().cloned().collect()
    }

    fn push_locked(&self, state: &mut HistoryState, content: &str) -> ClipboardItem {
        let created_at_epoch_ms = now_epoch_ms();
        let seq = state.next_seq;
        state.next_seq += 1;

        let item = ClipboardItem {
            id: format!("{created_at_epoch_ms}-{seq}"),
            content: content.to_string(),
            kind: ClipboardKind::Text,
            created_at_epoch_ms,
        };
        state.entries.push_front(item.clone());
        state.entries.truncate(self.capacity);
        item
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
