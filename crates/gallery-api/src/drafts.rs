//! Per-tab upload drafts
//!
//! The browser only carries the draft id in the URL; the `UploadView` lives here until
//! it is submitted successfully. Drafts are never persisted. Creating a draft first drops
//! drafts untouched for longer than the TTL, then the least recently touched ones while
//! the store is at capacity.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::constants::{DRAFT_TTL, MAX_DRAFTS};
use crate::views::UploadView;

struct Draft {
    view: UploadView,
    touched: Instant,
}

#[derive(Clone)]
pub struct DraftStore {
    drafts: Arc<RwLock<HashMap<Uuid, Draft>>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::with_limits(DRAFT_TTL, MAX_DRAFTS)
    }
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            drafts: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Start an empty draft and return its id
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut drafts = self.drafts.write().await;

        let before = drafts.len();
        drafts.retain(|_, draft| now.duration_since(draft.touched) < self.ttl);
        while drafts.len() >= self.capacity {
            let oldest = drafts
                .iter()
                .min_by_key(|(_, draft)| draft.touched)
                .map(|(id, _)| *id);
            match oldest {
                Some(oldest) => {
                    drafts.remove(&oldest);
                }
                None => break,
            }
        }
        let evicted = before - drafts.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = drafts.len(), "Stale upload drafts dropped");
        }

        drafts.insert(
            id,
            Draft {
                view: UploadView::new(),
                touched: now,
            },
        );
        id
    }

    /// Snapshot of a draft for rendering
    pub async fn get(&self, id: &Uuid) -> Option<UploadView> {
        self.drafts.read().await.get(id).map(|draft| draft.view.clone())
    }

    /// Apply `f` to a draft under the write lock; `None` when the draft is unknown.
    ///
    /// Never await provider calls inside `f`: the lock is held for its duration.
    pub async fn update<R>(&self, id: &Uuid, f: impl FnOnce(&mut UploadView) -> R) -> Option<R> {
        self.drafts.write().await.get_mut(id).map(|draft| {
            draft.touched = Instant::now();
            f(&mut draft.view)
        })
    }

    pub async fn remove(&self, id: &Uuid) -> Option<UploadView> {
        self.drafts.write().await.remove(id).map(|draft| draft.view)
    }

    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.drafts.read().await.is_empty()
    }
}
