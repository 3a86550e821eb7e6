//! Transient view state for the projects section.
//!
//! A [`ProjectsView`] owns exactly one repository load. The load runs in the
//! background and is the only writer of the view state; everything else reads
//! snapshots. Tearing the view down before the load settles discards the
//! result instead of applying it.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use folio_events::{EventSinkHandle, FolioEvent};
use folio_github::{RepoSummary, RepositorySource};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    selection::{Showcase, ShowcaseCache},
    FolioResult,
};

/// Snapshot of the projects section state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub repos: Vec<RepoSummary>,
    pub loading: bool,
    pub error: Option<String>,
    /// Number of writes applied so far. Zero until the load settles.
    pub generation: u64,
}

impl ViewState {
    fn pending() -> Self {
        Self {
            repos: Vec::new(),
            loading: true,
            error: None,
            generation: 0,
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.loading
    }
}

pub struct ProjectsView {
    account: String,
    state: watch::Receiver<ViewState>,
    cancelled: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
    showcase: ShowcaseCache,
    events: EventSinkHandle,
}

impl ProjectsView {
    /// Mounts the view and issues its single repository load.
    ///
    /// Must be called from within a tokio runtime. The load runs on the
    /// blocking pool; this returns immediately with the view in its loading
    /// state.
    pub fn mount<S>(
        source: S,
        account: impl Into<String>,
        featured: Vec<String>,
        events: EventSinkHandle,
    ) -> Self
    where
        S: RepositorySource + 'static,
    {
        let account = account.into();
        let (sender, state) = watch::channel(ViewState::pending());
        let cancelled = Arc::new(AtomicBool::new(false));

        events.emit(FolioEvent::LoadStarted {
            account: account.clone(),
        });

        let task = tokio::spawn(load(
            source,
            account.clone(),
            sender,
            cancelled.clone(),
            events.clone(),
        ));

        Self {
            account,
            state,
            cancelled,
            task: Mutex::new(Some(task)),
            showcase: ShowcaseCache::new(featured),
            events,
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Waits for the load to settle.
    ///
    /// Returns `None` if the view was torn down and the load finished without
    /// applying its result.
    pub async fn settled(&self) -> Option<ViewState> {
        let mut state = self.state.clone();
        let settled = state.wait_for(ViewState::is_settled).await.ok()?;
        Some(settled.clone())
    }

    /// Cancels the pending load.
    ///
    /// Once this returns, the load can no longer write to the view state.
    pub fn teardown(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("tearing down projects view for {}", self.account);
        }
        // waits out a write that passed the flag check before the store
        drop(self.state.borrow());
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Waits for the background load task to finish, whether or not its
    /// result was applied.
    pub async fn join(&self) -> FolioResult<()> {
        let task = self.task.lock().unwrap().take();
        if let Some(task) = task {
            task.await?;
        }
        Ok(())
    }

    /// The featured and top selections for the current state.
    ///
    /// Derived once per applied write and reused until the next one.
    pub fn showcase(&self) -> Arc<Showcase> {
        let state = self.state.borrow();
        let fresh = self.showcase.cached_generation() != Some(state.generation);
        let showcase = self.showcase.get(state.generation, &state.repos);

        if fresh && state.is_settled() {
            self.events.emit(FolioEvent::ShowcaseDerived {
                featured: showcase.featured.len(),
                top: showcase.top.len(),
            });
        }
        showcase
    }
}

impl Drop for ProjectsView {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

async fn load<S>(
    source: S,
    account: String,
    sender: watch::Sender<ViewState>,
    cancelled: Arc<AtomicBool>,
    events: EventSinkHandle,
) where
    S: RepositorySource + 'static,
{
    let fetch_account = account.clone();
    let result =
        tokio::task::spawn_blocking(move || source.fetch_repositories(&fetch_account)).await;

    let outcome = match result {
        Ok(Ok(repos)) => Ok(repos),
        Ok(Err(err)) => Err(err.to_string()),
        Err(err) => Err(format!("Failed to fetch repos: {err}")),
    };

    let event = match &outcome {
        Ok(repos) => {
            FolioEvent::LoadSucceeded {
                account: account.clone(),
                count: repos.len(),
            }
        }
        Err(error) => {
            FolioEvent::LoadFailed {
                account: account.clone(),
                error: error.clone(),
            }
        }
    };

    let applied = sender.send_if_modified(|state| {
        if cancelled.load(Ordering::SeqCst) {
            return false;
        }

        let generation = state.generation + 1;
        *state = match outcome {
            Ok(repos) => {
                ViewState {
                    repos,
                    loading: false,
                    error: None,
                    generation,
                }
            }
            Err(error) => {
                ViewState {
                    repos: Vec::new(),
                    loading: false,
                    error: Some(error),
                    generation,
                }
            }
        };
        true
    });

    if applied {
        if let FolioEvent::LoadFailed {
            error, ..
        } = &event
        {
            warn!("failed to load repositories for {account}: {error}");
        }
        events.emit(event);
    } else {
        debug!("discarding repository load for {account}: view was torn down");
        events.emit(FolioEvent::LoadDiscarded {
            account,
        });
    }
}
