use crate::clock::{Clock, IdGenerator};
use crate::errors::TrackerError;
use crate::legacy::SingleTimerStore;
use crate::models::TrackerView;
use crate::storage::{KeyValueStore, TrackerStore};
use crate::tracker::{Reached, TrackerBook, TrackerId, parse_start};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Application context. Every tracker mutation goes through here and is
/// mirrored to the store; the in-memory book stays authoritative if a
/// write fails, and the next tick retries it.
#[derive(Clone)]
pub struct AppState {
    pub trackers: Arc<Mutex<TrackerBook>>,
    pub store: TrackerStore,
    pub timer: SingleTimerStore,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    unsaved: Arc<AtomicBool>,
}

impl AppState {
    pub async fn load(
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let store = TrackerStore::new(kv.clone());
        let book = TrackerBook::new(store.load().await);
        info!(count = book.trackers().len(), "loaded trackers");
        Self {
            trackers: Arc::new(Mutex::new(book)),
            store,
            timer: SingleTimerStore::new(kv),
            clock,
            ids,
            unsaved: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub async fn views(&self) -> Vec<TrackerView> {
        let now = self.now_ms();
        let book = self.trackers.lock().await;
        book.trackers().iter().map(|t| TrackerView::of(t, now)).collect()
    }

    /// `start` of `None` starts the tracker now.
    pub async fn create(&self, title: &str, start: Option<&str>) -> Result<TrackerView, TrackerError> {
        let now = self.now_ms();
        let start_ms = match start {
            Some(input) => parse_start(input, now)?,
            None => now,
        };

        let mut book = self.trackers.lock().await;
        let view = {
            let tracker = book.create(self.ids.next_id(), title, start_ms, now)?;
            info!(id = %tracker.id, title = %tracker.title, start_ms, "created tracker");
            TrackerView::of(tracker, now)
        };
        self.persist(&book).await;
        Ok(view)
    }

    pub async fn reset(&self, id: &TrackerId, confirmed: bool) -> Result<(), TrackerError> {
        let mut book = self.trackers.lock().await;
        let removed = book.reset(id, confirmed)?;
        info!(id = %removed.id, title = %removed.title, "reset tracker");
        self.persist(&book).await;
        Ok(())
    }

    /// One refresh step: evaluate milestones for every tracker and save if
    /// anything changed or an earlier save failed.
    pub async fn refresh(&self) -> Vec<Reached> {
        let now = self.now_ms();
        let mut book = self.trackers.lock().await;
        let reached = book.refresh(now);
        for r in &reached {
            info!(id = %r.tracker_id, title = %r.title, milestone = r.milestone.message, "milestone reached");
        }
        if !reached.is_empty() || self.unsaved.load(Ordering::SeqCst) {
            self.persist(&book).await;
        }
        reached
    }

    async fn persist(&self, book: &TrackerBook) {
        match self.store.save(book.trackers()).await {
            Ok(()) => self.unsaved.store(false, Ordering::SeqCst),
            Err(err) => {
                error!("failed to save trackers: {err}");
                self.unsaved.store(true, Ordering::SeqCst);
            }
        }
    }
}
