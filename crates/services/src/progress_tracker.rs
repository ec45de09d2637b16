use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use api::ChefsApi;
use chefs_core::Clock;
use chefs_core::model::{LessonId, ProgressRecord, UserId, completed_lesson_set};

/// Score submitted for a lesson completed via a perfect quiz run.
pub const FULL_SCORE: i32 = 100;

/// A completion applied locally before the backend confirmed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingCompletion {
    score: i32,
    at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct TrackerState {
    records: Vec<ProgressRecord>,
    completed: HashSet<LessonId>,
    pending: HashMap<LessonId, PendingCompletion>,
    epoch: u64,
    loading: bool,
    error: Option<String>,
}

/// Cloneable view of the tracker for rendering. `completed` already includes
/// tentative completions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub records: Vec<ProgressRecord>,
    pub completed: HashSet<LessonId>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Read-through cache of one user's progress records with two-phase
/// optimistic completion:
///
/// 1. a successful submit registers a timestamped tentative completion so
///    the UI updates without flicker;
/// 2. the authoritative re-fetch replaces everything; tentative entries the
///    backend does not confirm are discarded.
///
/// Fetches are epoch-guarded: a response that lands after a newer fetch
/// started is ignored, so a stale request can never clobber fresher state.
pub struct ProgressTracker {
    api: Arc<dyn ChefsApi>,
    clock: Clock,
    state: Mutex<TrackerState>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(api: Arc<dyn ChefsApi>, clock: Clock) -> Self {
        Self {
            api,
            clock,
            state: Mutex::new(TrackerState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches all progress records for the user and rebuilds the completed
    /// set. Failures land in the snapshot's `error`; this method never
    /// propagates.
    pub async fn fetch(&self, user_id: UserId) {
        let epoch = {
            let mut state = self.lock();
            state.epoch += 1;
            state.loading = true;
            state.error = None;
            state.epoch
        };

        match self.api.list_progress(user_id).await {
            Ok(records) => {
                let mut guard = self.lock();
                let state = &mut *guard;
                if state.epoch != epoch {
                    debug!("ignoring progress fetch superseded by a newer one");
                    return;
                }
                state.completed = completed_lesson_set(&records);
                for (lesson_id, pending) in state.pending.drain() {
                    if !state.completed.contains(&lesson_id) {
                        // Authoritative list disagrees; the tentative write
                        // is gone.
                        warn!(
                            lesson = %lesson_id,
                            submitted_at = %pending.at,
                            "tentative completion not confirmed by backend; discarding"
                        );
                    }
                }
                state.records = records;
                state.loading = false;
            }
            Err(err) => {
                let mut state = self.lock();
                if state.epoch != epoch {
                    return;
                }
                warn!(%err, "failed to fetch user progress");
                state.error = Some(err.message());
                state.loading = false;
            }
        }
    }

    /// Submits a completion, applies it optimistically, then re-fetches to
    /// reconcile with backend truth. Returns whether the submit succeeded;
    /// never panics or propagates.
    pub async fn save_completion(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
        score: i32,
    ) -> bool {
        let record = ProgressRecord::completion(user_id, lesson_id, score);
        match self.api.submit_progress(&record).await {
            Ok(()) => {
                {
                    let mut state = self.lock();
                    state.pending.insert(
                        lesson_id,
                        PendingCompletion {
                            score,
                            at: self.clock.now(),
                        },
                    );
                    state.error = None;
                }
                self.fetch(user_id).await;
                true
            }
            Err(err) => {
                warn!(%err, lesson = %lesson_id, "failed to save lesson completion");
                let mut state = self.lock();
                state.error = Some(err.message());
                false
            }
        }
    }

    /// Membership in the completed set, tentative completions included.
    #[must_use]
    pub fn is_completed(&self, lesson_id: LessonId) -> bool {
        let state = self.lock();
        state.completed.contains(&lesson_id) || state.pending.contains_key(&lesson_id)
    }

    /// The backend record for a lesson, if one exists.
    #[must_use]
    pub fn record_for(&self, lesson_id: LessonId) -> Option<ProgressRecord> {
        self.lock()
            .records
            .iter()
            .find(|record| record.lesson_id == lesson_id)
            .cloned()
    }

    /// The effective completed set (confirmed plus tentative).
    #[must_use]
    pub fn completed_set(&self) -> HashSet<LessonId> {
        let state = self.lock();
        let mut set = state.completed.clone();
        set.extend(state.pending.keys().copied());
        set
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let state = self.lock();
        let mut completed = state.completed.clone();
        completed.extend(state.pending.keys().copied());
        ProgressSnapshot {
            records: state.records.clone(),
            completed,
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Drops all cached progress (used on logout).
    pub fn reset(&self) {
        let mut state = self.lock();
        let epoch = state.epoch + 1;
        *state = TrackerState {
            epoch,
            ..TrackerState::default()
        };
    }

    #[cfg(test)]
    fn insert_tentative(&self, lesson_id: LessonId) {
        self.lock().pending.insert(
            lesson_id,
            PendingCompletion {
                score: FULL_SCORE,
                at: self.clock.now(),
            },
        );
    }

    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }
}
