//! Scoring a spoken attempt and recording it.

use chrono::{DateTime, Utc};
use pronunciation_core::{record_attempt, score_lesson, Attempt, ProgressRecord, Submission};
use uuid::Uuid;

use crate::db::{Database, PgProgressStore};
use crate::error::{ApiError, Result};
use crate::models::{DbLesson, DbSubmission, SubmitAudioRequest};

/// Longest transcript accepted, in bytes. Scoring allocates a table of
/// `transcript x reference` cells, so this bounds per-request memory.
pub const MAX_TRANSCRIPT_LEN: usize = 4 * 1024;

/// A scored attempt ready to be persisted.
#[derive(Debug, Clone)]
pub struct ScoredAttempt {
    pub submission: DbSubmission,
    pub attempt: Attempt,
}

/// Check the request fields that don't need the database.
pub fn validate_request(request: &SubmitAudioRequest) -> Result<(Uuid, String)> {
    let lesson_id = request
        .lesson_id
        .ok_or_else(|| ApiError::BadRequest("lesson_id is required".to_string()))?;

    let audio_ref = request
        .audio_ref
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ApiError::BadRequest("audio_ref is required".to_string()))?;

    if let Some(transcript) = &request.transcript {
        if transcript.len() > MAX_TRANSCRIPT_LEN {
            return Err(ApiError::BadRequest(format!(
                "transcript must be at most {MAX_TRANSCRIPT_LEN} bytes"
            )));
        }
    }

    Ok((lesson_id, audio_ref.to_string()))
}

/// Score a transcript against a lesson. A missing transcript scores as silence.
pub fn score_attempt(
    user_id: Uuid,
    lesson: &DbLesson,
    audio_ref: String,
    transcript: Option<&str>,
    now: DateTime<Utc>,
) -> ScoredAttempt {
    let result = score_lesson(&lesson.lesson_text(), transcript);

    let submission = DbSubmission {
        id: Uuid::new_v4(),
        user_id,
        lesson_id: lesson.id,
        audio_ref,
        transcript: transcript.unwrap_or_default().to_string(),
        score: i32::from(result.score),
        feedback_tier: result.feedback.as_str().to_string(),
        submitted_at: now,
    };

    let attempt = Attempt {
        user_id,
        lesson_id: lesson.id,
        score: result.score,
        at: now,
    };

    ScoredAttempt { submission, attempt }
}

/// Validate, score, and store a submission together with the progress update.
///
/// The submission row and the progress write share one transaction, so a
/// failed progress update leaves no orphaned submission behind.
pub async fn submit(
    db: &Database,
    user_id: Uuid,
    request: &SubmitAudioRequest,
) -> Result<(Submission, ProgressRecord)> {
    let (lesson_id, audio_ref) = validate_request(request)?;

    let lesson = db
        .get_lesson(lesson_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    let scored = score_attempt(
        user_id,
        &lesson,
        audio_ref,
        request.transcript.as_deref(),
        Utc::now(),
    );

    let mut tx = db.begin().await?;
    let stored = Database::insert_submission(&mut tx, &scored.submission).await?;
    let progress = {
        let store = PgProgressStore::new(&mut tx);
        record_attempt(&store, &scored.attempt).await?
    };
    tx.commit().await?;

    tracing::info!(
        user_id = %user_id,
        lesson_id = %lesson_id,
        score = stored.score,
        completed = progress.completed,
        "recorded voice submission"
    );

    Ok((stored.to_api_submission(), progress))
}
