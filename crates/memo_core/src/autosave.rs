//! Debounced autosave for the memo editor.
//!
//! # Responsibility
//! - Buffer content edits per memo and flush only after a quiescence window.
//! - Keep at most one pending flush per memo: a new edit cancels and
//!   restarts the pending one.
//!
//! # Invariants
//! - A flush always writes the most recently scheduled content.
//! - Failed flushes are logged and not retried.
//! - Nothing is flushed on drop; unsaved edits inside the window are lost.
//! - The sink runs on the blocking pool; a write already handed off there
//!   completes even if the scheduler is dropped.

use crate::config::StoreConfig;
use crate::model::memo::MemoId;
use log::{debug, error, info};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Destination for flushed memo content.
pub trait ContentSink: Send + Sync + 'static {
    type Error: Display;

    fn save_content(&self, memo_id: MemoId, content: &str) -> Result<(), Self::Error>;
}

struct PendingFlush {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Slots {
    next_generation: u64,
    pending: HashMap<MemoId, PendingFlush>,
}

/// Single-slot-per-memo debounced scheduler.
///
/// Must be used from within a tokio runtime.
pub struct AutosaveScheduler<S: ContentSink> {
    sink: Arc<S>,
    delay: Duration,
    slots: Arc<Mutex<Slots>>,
}

impl<S: ContentSink> AutosaveScheduler<S> {
    pub fn new(sink: Arc<S>, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            slots: Arc::new(Mutex::new(Slots::default())),
        }
    }

    /// Uses the configured quiescence window.
    pub fn with_config(sink: Arc<S>, config: &StoreConfig) -> Self {
        Self::new(sink, config.autosave_delay)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms a flush of `content` for `memo_id`, replacing any pending one.
    pub fn schedule(&self, memo_id: MemoId, content: impl Into<String>) {
        let content = content.into();
        let mut slots = lock_slots(&self.slots);
        slots.next_generation += 1;
        let generation = slots.next_generation;

        if let Some(previous) = slots.pending.remove(&memo_id) {
            previous.handle.abort();
        }

        let sink = Arc::clone(&self.sink);
        let shared = Arc::clone(&self.slots);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut slots = lock_slots(&shared);
                let still_current = slots
                    .pending
                    .get(&memo_id)
                    .is_some_and(|pending| pending.generation == generation);
                if !still_current {
                    return;
                }
                slots.pending.remove(&memo_id);
            }

            let saved = tokio::task::spawn_blocking(move || {
                sink.save_content(memo_id, content.as_str())
                    .map_err(|err| err.to_string())
            })
            .await;

            match saved {
                Ok(Ok(())) => {
                    info!("event=autosave_flush module=autosave status=ok memo_id={memo_id}")
                }
                Ok(Err(err)) => error!(
                    "event=autosave_flush module=autosave status=error memo_id={} error={}",
                    memo_id, err
                ),
                Err(err) => error!(
                    "event=autosave_flush module=autosave status=error memo_id={} error_code=join_failed error={}",
                    memo_id, err
                ),
            }
        });

        slots
            .pending
            .insert(memo_id, PendingFlush { generation, handle });
        debug!(
            "event=autosave_schedule module=autosave status=armed memo_id={} delay_ms={}",
            memo_id,
            self.delay.as_millis()
        );
    }

    /// Drops the pending flush for `memo_id`. Returns `true` if one existed.
    pub fn cancel(&self, memo_id: MemoId) -> bool {
        match lock_slots(&self.slots).pending.remove(&memo_id) {
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Returns whether a flush is armed for `memo_id`.
    pub fn is_pending(&self, memo_id: MemoId) -> bool {
        lock_slots(&self.slots).pending.contains_key(&memo_id)
    }

    /// Number of memos with an armed flush.
    pub fn pending_count(&self) -> usize {
        lock_slots(&self.slots).pending.len()
    }
}

impl<S: ContentSink> Drop for AutosaveScheduler<S> {
    fn drop(&mut self) {
        let mut slots = lock_slots(&self.slots);
        for (_, pending) in slots.pending.drain() {
            pending.handle.abort();
        }
    }
}

fn lock_slots(slots: &Mutex<Slots>) -> MutexGuard<'_, Slots> {
    slots
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
