use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::lookup::suggest;
use crate::domain::LookupError;
use crate::domain::lookups::{ImageLookup, WordLookup};
use crate::domain::query::CatQuery;
use crate::domain::search::SearchState;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(600);

/// Whether a key press was consumed, in which case its default action must not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Handled,
    Ignored,
}

/// Owns the search screen state and drives the debounced lookup pipeline.
///
/// Every query change opens a new epoch. Opening an epoch cancels the previous
/// one's token, which stops its pending timer and drops its in-flight
/// requests. Completions re-check their epoch under the same lock before
/// writing, so a stale result never reaches the state.
///
/// Methods that change the query spawn tasks and must run inside a tokio
/// runtime.
#[derive(Clone)]
pub struct SearchCoordinator {
    shared: Arc<Shared>,
}

struct Shared {
    images: Arc<dyn ImageLookup>,
    words: Arc<dyn WordLookup>,
    debounce: Duration,
    epoch: Mutex<Epoch>,
    state: watch::Sender<SearchState>,
}

struct Epoch {
    id: u64,
    token: CancellationToken,
}

impl SearchCoordinator {
    pub fn new(
        images: Arc<dyn ImageLookup>,
        words: Arc<dyn WordLookup>,
        debounce: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            shared: Arc::new(Shared {
                images,
                words,
                debounce,
                epoch: Mutex::new(Epoch {
                    id: 0,
                    token: CancellationToken::new(),
                }),
                state,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    /// Replace the query and (re)start the debounce timer.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();

        let (id, token) = {
            let mut epoch = self.shared.lock_epoch();
            epoch.token.cancel();
            epoch.id += 1;
            epoch.token = CancellationToken::new();

            self.shared.state.send_modify(|state| {
                state.query.clone_from(&query);
                if query.is_empty() {
                    state.suggestion = None;
                } else {
                    state.validate_suggestion();
                }
            });
            (epoch.id, epoch.token.clone())
        };
        debug!(epoch = id, query = %query, "query changed");

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let fired = tokio::select! {
                () = token.cancelled() => false,
                () = tokio::time::sleep(shared.debounce) => true,
            };
            if fired {
                shared.run_search(id, token, query).await;
            }
        });
    }

    /// Explicit submit. Takes the same debounced path as typing.
    pub fn submit(&self, raw: &str) {
        self.set_query(raw);
    }

    /// Tab: adopt the displayed prediction when it is longer than the query.
    pub fn accept_suggestion(&self) -> KeyDisposition {
        let (query, prediction) = {
            let state = self.shared.state.borrow();
            (state.query.clone(), state.prediction())
        };

        match prediction {
            Some(prediction) if query.chars().count() < prediction.chars().count() => {
                self.set_query(prediction);
                KeyDisposition::Handled
            }
            _ => KeyDisposition::Ignored,
        }
    }

    /// Cancel whatever the current epoch still has pending.
    pub fn shutdown(&self) {
        self.shared.lock_epoch().token.cancel();
    }
}

impl Shared {
    fn lock_epoch(&self) -> MutexGuard<'_, Epoch> {
        self.epoch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `update` only while epoch `id` is still the current one.
    fn apply_if_current(&self, id: u64, update: impl FnOnce(&mut SearchState)) -> bool {
        let epoch = self.lock_epoch();
        if epoch.id != id {
            return false;
        }
        self.state.send_modify(update);
        true
    }

    async fn run_search(self: Arc<Self>, id: u64, token: CancellationToken, query: String) {
        if query.is_empty() {
            self.apply_if_current(id, |state| {
                state.loading = false;
                state.error = None;
                state.result = None;
                state.suggestion = None;
            });
            return;
        }

        let started = self.apply_if_current(id, |state| {
            state.loading = true;
            state.error = None;
            state.result = None;
            state.suggestion = None;
        });
        if !started {
            return;
        }

        let cat_query = CatQuery::from_query(&query);

        let shared = Arc::clone(&self);
        let target = cat_query.suggestion_target().to_string();
        let suggestion_token = token.clone();
        tokio::spawn(async move {
            shared.run_suggestion(id, suggestion_token, target).await;
        });

        match cancellable(&token, self.images.fetch(&cat_query)).await {
            Ok(image) => {
                info!(epoch = id, query = %query, len = image.len(), "found a cat");
                self.apply_if_current(id, |state| {
                    state.result = Some(image);
                    state.loading = false;
                });
            }
            Err(LookupError::NotFound) => {
                info!(epoch = id, query = %query, "no cat matched");
                self.apply_if_current(id, |state| {
                    state.result = None;
                    state.loading = false;
                });
            }
            Err(LookupError::Cancelled) => {
                debug!(epoch = id, query = %query, "image lookup superseded");
            }
            Err(LookupError::Request(message)) => {
                warn!(epoch = id, query = %query, error = %message, "image lookup failed");
                self.apply_if_current(id, |state| {
                    state.error = Some(message);
                    state.loading = false;
                });
            }
        }
    }

    async fn run_suggestion(&self, id: u64, token: CancellationToken, target: String) {
        match cancellable(&token, suggest(self.words.as_ref(), &target)).await {
            Ok(Some(word)) => {
                self.apply_if_current(id, |state| {
                    state.suggestion = Some(word);
                    state.validate_suggestion();
                });
            }
            Ok(None) => debug!(epoch = id, target = %target, "no suggestion"),
            Err(LookupError::Cancelled) => debug!(epoch = id, target = %target, "suggestion superseded"),
            Err(err) => warn!(epoch = id, target = %target, error = %err, "suggestion lookup failed"),
        }
    }
}

async fn cancellable<T>(
    token: &CancellationToken,
    work: impl Future<Output = Result<T, LookupError>>,
) -> Result<T, LookupError> {
    tokio::select! {
        biased;
        () = token.cancelled() => Err(LookupError::Cancelled),
        result = work => result,
    }
}
