//! Pagination-and-fetch state machine behind the application listing.
//!
//! The controller owns the snapshot and the page cursor. Every mutation of the snapshot
//! goes through [`PaginatedFetchController::begin`] and [`PaginatedFetchController::settle`];
//! the three public actions only decide which page to request and whether the result is
//! appended or replaces what is held.
//!
//! Each fetch carries a generation number. A settlement whose generation is no longer the
//! latest (because a reset or refetch started after it) is dropped without touching the
//! snapshot.

use std::{
    num::NonZeroU32,
    sync::{Arc, Weak},
};

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::{
    error::FetchError,
    source::{Page, PageRequest, RecordSource},
};

/// Externally observable listing state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<R> {
    /// Records in arrival order.
    pub records: Vec<R>,
    pub is_loading: bool,
    /// Message of the most recent failed fetch; cleared when a new fetch starts.
    pub error: Option<String>,
    /// Whether another page is expected. Optimistically true while the total is unknown.
    pub has_more: bool,
    /// Server-reported total, absent until the first successful fetch.
    pub total_count: Option<u64>,
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            is_loading: false,
            error: None,
            has_more: true,
            total_count: None,
        }
    }
}

struct ControllerState<R> {
    snapshot: Snapshot<R>,
    current_page: u32,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket {
    page: u32,
    append: bool,
    generation: u64,
}

pub struct PaginatedFetchController<R> {
    source: Arc<dyn RecordSource<R>>,
    page_size: NonZeroU32,
    inner: Mutex<ControllerState<R>>,
    snapshots: watch::Sender<Snapshot<R>>,
}

fn has_more_after(page: u32, page_size: NonZeroU32, total_count: u64) -> bool {
    u64::from(page) * u64::from(page_size.get()) < total_count
}

impl<R> PaginatedFetchController<R>
where
    R: Clone + Send + Sync + 'static,
{
    /// Creates the controller and performs the initial load (page 1, replacing).
    ///
    /// Returns once that load has settled. A failed initial load does not fail
    /// construction; it is reported through [`Snapshot::error`].
    pub async fn new(source: Arc<dyn RecordSource<R>>, page_size: NonZeroU32) -> Arc<Self> {
        let controller = Self::unloaded(source, page_size);
        controller.reset_and_fetch().await;
        controller
    }

    /// Creates the controller without requesting anything, so a collaborator can
    /// subscribe before the first load. [`Self::reset_and_fetch`] starts that load.
    pub fn unloaded(source: Arc<dyn RecordSource<R>>, page_size: NonZeroU32) -> Arc<Self> {
        Arc::new(Self::idle(source, page_size))
    }

    fn idle(source: Arc<dyn RecordSource<R>>, page_size: NonZeroU32) -> Self {
        let (snapshots, _) = watch::channel(Snapshot::default());
        Self {
            source,
            page_size,
            inner: Mutex::new(ControllerState {
                snapshot: Snapshot::default(),
                current_page: 1,
                generation: 0,
            }),
            snapshots,
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot<R> {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<R>> {
        self.snapshots.subscribe()
    }

    /// Loads and appends the next page.
    ///
    /// No-op while a fetch is in flight or once the listing is exhausted. A failure is
    /// logged and left in [`Snapshot::error`]; the cursor keeps the advanced page.
    pub async fn fetch_next_page(self: &Arc<Self>) {
        let ticket = {
            let mut state = self.inner.lock().await;
            if state.snapshot.is_loading || !state.snapshot.has_more {
                debug!(
                    is_loading = state.snapshot.is_loading,
                    has_more = state.snapshot.has_more,
                    "fetch_next_page skipped"
                );
                return;
            }
            state.current_page += 1;
            let page = state.current_page;
            self.begin(&mut state, page, true)
        };

        if let Err(err) = self.fetch_page(ticket).await {
            warn!(
                page = ticket.page,
                error_kind = %err.kind(),
                error = %err,
                "failed to fetch next page"
            );
        }
    }

    /// Drops everything held, rewinds the cursor to page 1 and loads it.
    pub async fn reset_and_fetch(self: &Arc<Self>) {
        let ticket = {
            let mut state = self.inner.lock().await;
            state.current_page = 1;
            state.snapshot.records.clear();
            state.snapshot.has_more = true;
            state.snapshot.total_count = None;
            self.begin(&mut state, 1, false)
        };

        if let Err(err) = self.fetch_page(ticket).await {
            warn!(error_kind = %err.kind(), error = %err, "failed to reload listing");
        }
    }

    /// Reloads the current page, replacing the held records with it. The cursor is kept.
    pub async fn refetch(self: &Arc<Self>) {
        let ticket = {
            let mut state = self.inner.lock().await;
            let page = state.current_page;
            self.begin(&mut state, page, false)
        };

        if let Err(err) = self.fetch_page(ticket).await {
            warn!(
                page = ticket.page,
                error_kind = %err.kind(),
                error = %err,
                "failed to refetch current page"
            );
        }
    }

    fn begin(&self, state: &mut ControllerState<R>, page: u32, append: bool) -> Ticket {
        state.generation += 1;
        state.snapshot.is_loading = true;
        state.snapshot.error = None;
        self.snapshots.send_replace(state.snapshot.clone());
        debug!(page, append, generation = state.generation, "fetching page");
        Ticket {
            page,
            append,
            generation: state.generation,
        }
    }

    /// Runs the source request on its own task so that dropping the caller's future does
    /// not leave the snapshot stuck in the loading state. The task only holds a weak
    /// reference to the controller; if the controller is gone by the time the source
    /// answers, the answer is ignored.
    async fn fetch_page(self: &Arc<Self>, ticket: Ticket) -> Result<(), FetchError> {
        let source = Arc::clone(&self.source);
        let owner: Weak<Self> = Arc::downgrade(self);
        let request = PageRequest {
            page: ticket.page,
            page_size: self.page_size.get(),
        };

        let task = tokio::spawn(async move {
            let outcome = source.fetch_page(request).await;
            match owner.upgrade() {
                Some(controller) => controller.settle(ticket, outcome).await,
                None => {
                    debug!(page = ticket.page, "listing released before fetch settled");
                    Ok(())
                }
            }
        });

        match task.await {
            Ok(result) => result,
            Err(join_err) => {
                let err = FetchError::Transport(format!("record source task failed: {join_err}"));
                self.settle(ticket, Err(err)).await
            }
        }
    }

    async fn settle(
        &self,
        ticket: Ticket,
        outcome: Result<Page<R>, FetchError>,
    ) -> Result<(), FetchError> {
        let mut state = self.inner.lock().await;
        if state.generation != ticket.generation {
            debug!(
                page = ticket.page,
                generation = ticket.generation,
                current_generation = state.generation,
                failed = outcome.is_err(),
                "discarding superseded fetch"
            );
            return Ok(());
        }

        let snapshot = &mut state.snapshot;
        snapshot.is_loading = false;
        let settlement = match outcome {
            Ok(page) => {
                let received = page.records.len();
                if ticket.append {
                    snapshot.records.extend(page.records);
                } else {
                    snapshot.records = page.records;
                }
                snapshot.total_count = Some(page.total_count);
                snapshot.has_more = has_more_after(ticket.page, self.page_size, page.total_count);
                debug!(
                    page = ticket.page,
                    received,
                    held = snapshot.records.len(),
                    total_count = page.total_count,
                    has_more = snapshot.has_more,
                    "page applied"
                );
                Ok(())
            }
            Err(err) => {
                snapshot.error = Some(err.to_string());
                Err(err)
            }
        };

        self.snapshots.send_replace(state.snapshot.clone());
        settlement
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
