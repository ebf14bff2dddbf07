//! Per-user, per-lesson progress and the rule for applying an attempt to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::store::ProgressStore;

/// Lowest score that marks a lesson as completed.
///
/// Independent of the feedback tiers: a "Good" attempt (75..80) does not
/// complete a lesson.
pub const COMPLETION_THRESHOLD: u8 = 80;

/// A scored attempt to be folded into progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub score: u8,
    pub at: DateTime<Utc>,
}

impl Attempt {
    pub fn completes_lesson(&self) -> bool {
        self.score >= COMPLETION_THRESHOLD
    }
}

/// Progress for one (user, lesson) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub completed: bool,
    /// Best score so far. Never lowered.
    pub score: u8,
    pub last_attempted: DateTime<Utc>,
}

impl ProgressRecord {
    /// Record created by the first attempt on a lesson.
    pub fn first_attempt(attempt: &Attempt) -> Self {
        Self {
            user_id: attempt.user_id,
            lesson_id: attempt.lesson_id,
            completed: attempt.completes_lesson(),
            score: attempt.score,
            last_attempted: attempt.at,
        }
    }

    /// This record after one more attempt.
    pub fn with_attempt(&self, attempt: &Attempt) -> Self {
        Self {
            user_id: self.user_id,
            lesson_id: self.lesson_id,
            completed: self.completed || attempt.completes_lesson(),
            score: self.score.max(attempt.score),
            last_attempted: attempt.at,
        }
    }

    /// Combine two views of the same record without losing progress.
    ///
    /// Commutative: stores use it to apply a write on top of whatever a
    /// concurrent writer committed in the meantime.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            user_id: self.user_id,
            lesson_id: self.lesson_id,
            completed: self.completed || other.completed,
            score: self.score.max(other.score),
            last_attempted: self.last_attempted.max(other.last_attempted),
        }
    }
}

/// Apply an attempt to an optional existing record.
pub fn apply_attempt(existing: Option<&ProgressRecord>, attempt: &Attempt) -> ProgressRecord {
    match existing {
        Some(record) => record.with_attempt(attempt),
        None => ProgressRecord::first_attempt(attempt),
    }
}

/// Fold an attempt into the store and return the stored record.
///
/// When the record is absent the updater tries to create it. If a concurrent
/// attempt created it first, the store reports [`StoreError::Conflict`] and
/// the attempt is retried once as an update.
pub async fn record_attempt<S>(store: &S, attempt: &Attempt) -> Result<ProgressRecord>
where
    S: ProgressStore + ?Sized,
{
    if let Some(existing) = store.find(attempt.user_id, attempt.lesson_id).await? {
        return store.update(&existing.with_attempt(attempt)).await;
    }

    match store.create(&ProgressRecord::first_attempt(attempt)).await {
        Err(StoreError::Conflict) => {
            tracing::debug!(
                user_id = %attempt.user_id,
                lesson_id = %attempt.lesson_id,
                "progress created concurrently, retrying as update"
            );
            let existing = store
                .find(attempt.user_id, attempt.lesson_id)
                .await?
                .ok_or(StoreError::NotFound)?;
            store.update(&existing.with_attempt(attempt)).await
        }
        other => other,
    }
}
