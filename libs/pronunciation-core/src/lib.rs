//! Core pronunciation library used by the backend.
//!
//! Provides:
//! - Text normalization for phrase comparison
//! - Levenshtein edit distance
//! - Percentage scoring and feedback tiers
//! - Progress update rules and the progress store contract
//! - Shared types (Submission, LessonText, Role, Language)

pub mod error;
pub mod matching;
pub mod normalize;
pub mod progress;
pub mod scoring;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use matching::levenshtein_distance;
pub use normalize::{normalize, normalize_opt};
pub use progress::{apply_attempt, record_attempt, Attempt, ProgressRecord, COMPLETION_THRESHOLD};
pub use scoring::{
    score, score_lesson, FeedbackTier, ScoreResult, EXCELLENT_THRESHOLD, FAIR_THRESHOLD,
    GOOD_THRESHOLD,
};
pub use store::{InMemoryProgressStore, ProgressStore};
pub use types::{Language, LessonText, Role, Submission};
