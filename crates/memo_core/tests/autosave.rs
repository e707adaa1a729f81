use memo_core::{
    AutosaveScheduler, ContentSink, FolderService, LocalStore, MemoId, MemoService, StoreConfig,
    DEFAULT_AUTOSAVE_DELAY,
};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;
use tokio::time::sleep;

const WINDOW: Duration = Duration::from_millis(1000);

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<(MemoId, String)>>,
    fail: bool,
}

impl RecordingSink {
    fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn calls(&self) -> Vec<(MemoId, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentSink for RecordingSink {
    type Error = String;

    fn save_content(&self, memo_id: MemoId, content: &str) -> Result<(), Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((memo_id, content.to_string()));
        if self.fail {
            return Err("disk full".to_string());
        }
        Ok(())
    }
}

#[derive(Default)]
struct ThreadRecordingSink {
    threads: Mutex<Vec<ThreadId>>,
}

impl ContentSink for ThreadRecordingSink {
    type Error = String;

    fn save_content(&self, _memo_id: MemoId, _content: &str) -> Result<(), Self::Error> {
        self.threads.lock().unwrap().push(thread::current().id());
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_produce_one_write_with_final_content() {
    let sink = Arc::new(RecordingSink::default());
    let scheduler = AutosaveScheduler::new(Arc::clone(&sink), WINDOW);

    scheduler.schedule(1, "a");
    sleep(Duration::from_millis(300)).await;
    scheduler.schedule(1, "ab");
    sleep(Duration::from_millis(300)).await;
    scheduler.schedule(1, "abc");

    sleep(Duration::from_millis(900)).await;
    assert!(sink.calls().is_empty());
    assert!(scheduler.is_pending(1));

    sleep(Duration::from_millis(200)).await;
    assert_eq!(sink.calls(), vec![(1, "abc".to_string())]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn edit_after_quiet_window_produces_second_write() {
    let sink = Arc::new(RecordingSink::default());
    let scheduler = AutosaveScheduler::new(Arc::clone(&sink), WINDOW);

    scheduler.schedule(1, "first");
    sleep(Duration::from_millis(1100)).await;
    scheduler.schedule(1, "second");
    sleep(Duration::from_millis(1100)).await;

    assert_eq!(
        sink.calls(),
        vec![(1, "first".to_string()), (1, "second".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn memos_are_debounced_independently() {
    let sink = Arc::new(RecordingSink::default());
    let scheduler = AutosaveScheduler::new(Arc::clone(&sink), WINDOW);

    scheduler.schedule(1, "one");
    scheduler.schedule(2, "two");
    assert_eq!(scheduler.pending_count(), 2);

    sleep(Duration::from_millis(1100)).await;
    let mut calls = sink.calls();
    calls.sort();
    assert_eq!(
        calls,
        vec![(1, "one".to_string()), (2, "two".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_pending_flush() {
    let sink = Arc::new(RecordingSink::default());
    let scheduler = AutosaveScheduler::new(Arc::clone(&sink), WINDOW);

    scheduler.schedule(1, "unsaved");
    assert!(scheduler.cancel(1));
    assert!(!scheduler.cancel(1));

    sleep(Duration::from_millis(1500)).await;
    assert!(sink.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_scheduler_loses_unsaved_tail() {
    let sink = Arc::new(RecordingSink::default());
    let scheduler = AutosaveScheduler::new(Arc::clone(&sink), WINDOW);

    scheduler.schedule(1, "tail");
    sleep(Duration::from_millis(500)).await;
    drop(scheduler);

    sleep(Duration::from_millis(1500)).await;
    assert!(sink.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_flush_is_not_retried() {
    let sink = Arc::new(RecordingSink::failing());
    let scheduler = AutosaveScheduler::new(Arc::clone(&sink), WINDOW);

    scheduler.schedule(1, "text");
    sleep(Duration::from_millis(5000)).await;

    assert_eq!(sink.calls().len(), 1);
    assert_eq!(scheduler.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn memo_service_receives_debounced_content() {
    let config = StoreConfig::in_memory();
    let store = Arc::new(LocalStore::new(config.clone()));
    let folders = FolderService::new(Arc::clone(&store));
    let memos = Arc::new(MemoService::new(store));
    let folder_id = folders.create("Work").unwrap();
    let memo_id = memos.create(folder_id, "Note", "").unwrap();

    let scheduler = AutosaveScheduler::with_config(Arc::clone(&memos), &config);
    assert_eq!(scheduler.delay(), DEFAULT_AUTOSAVE_DELAY);
    scheduler.schedule(memo_id, "Hello");
    scheduler.schedule(memo_id, "Hello, world");

    sleep(Duration::from_millis(500)).await;
    assert_eq!(memos.get(memo_id).unwrap().unwrap().content, "");

    sleep(Duration::from_millis(700)).await;
    assert_eq!(memos.get(memo_id).unwrap().unwrap().content, "Hello, world");
}

#[tokio::test(start_paused = true)]
async fn flush_runs_on_blocking_pool_not_runtime_thread() {
    let sink = Arc::new(ThreadRecordingSink::default());
    let scheduler = AutosaveScheduler::new(Arc::clone(&sink), WINDOW);
    let runtime_thread = thread::current().id();

    scheduler.schedule(1, "text");
    sleep(Duration::from_millis(1100)).await;

    let threads = sink.threads.lock().unwrap().clone();
    assert_eq!(threads.len(), 1);
    assert_ne!(threads[0], runtime_thread);
}
