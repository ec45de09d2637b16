use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{LessonId, UserId};

/// Lifecycle state of a user's relationship to a lesson, as the backend
/// stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Locked,
    Available,
    Completed,
    /// Any status string this client does not know about. Treated as
    /// not-completed everywhere.
    #[serde(other)]
    Unknown,
}

impl ProgressStatus {
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Backend-owned fact that a user reached some status on a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub status: ProgressStatus,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// A completion record as the client submits it: status completed with
    /// the given score.
    #[must_use]
    pub fn completion(user_id: UserId, lesson_id: LessonId, score: i32) -> Self {
        Self {
            user_id,
            lesson_id,
            status: ProgressStatus::Completed,
            score: Some(score),
            completed_at: None,
        }
    }
}

/// Derives the set of completed lesson ids from a record list.
///
/// Recomputation over the same input always yields the same set.
#[must_use]
pub fn completed_lesson_set(records: &[ProgressRecord]) -> HashSet<LessonId> {
    records
        .iter()
        .filter(|record| record.status.is_completed())
        .map(|record| record.lesson_id)
        .collect()
}

/// Completed/total counts for some lesson scope (a skill or a cuisine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    completed: usize,
    total: usize,
}

impl ProgressSummary {
    /// Builds a summary, capping `completed` at `total` so percentages stay
    /// in range even against inconsistent inputs.
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed: completed.min(total),
            total,
        }
    }

    /// Counts scope lessons that appear in the completed set.
    #[must_use]
    pub fn for_lessons(lesson_ids: &[LessonId], completed: &HashSet<LessonId>) -> Self {
        let done = lesson_ids
            .iter()
            .filter(|id| completed.contains(id))
            .count();
        Self::new(done, lesson_ids.len())
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// `0.0` for an empty scope, otherwise `completed / total * 100`.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                self.completed as f64 / self.total as f64 * 100.0
            }
        }
    }

    /// Sums two summaries (used for cuisine-level aggregation over skills).
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self::new(self.completed + other.completed, self.total + other.total)
    }
}
