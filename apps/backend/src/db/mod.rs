//! PostgreSQL database operations

mod progress;

pub use progress::PgProgressStore;

use sqlx::{postgres::PgPoolOptions, PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

const USER_COLUMNS: &str =
    "id, name, email, preferred_language, role, created_at, updated_at, last_seen_at";

const LESSON_COLUMNS: &str = "id, title, description, language_code, content, expected_text, \
     audio_example_url, sort_order, created_at, updated_at";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that only connects on first use
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Start a transaction
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    // === User Repository ===

    /// Create a user whose bearer token hashes to `token_hash`
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        preferred_language: Language,
        role: Role,
        token_hash: &str,
    ) -> Result<DbUser> {
        sqlx::query_as::<_, DbUser>(&format!(
            r#"
            INSERT INTO users (name, email, preferred_language, role, token_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(preferred_language.as_str())
        .bind(role.as_str())
        .bind(token_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "Email already in use"))
    }

    /// Get user by token hash
    pub async fn get_user_by_token_hash(&self, token_hash: &str) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE token_hash = $1"
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite the editable profile fields
    pub async fn update_user_profile(&self, user: &DbUser) -> Result<DbUser> {
        sqlx::query_as::<_, DbUser>(&format!(
            r#"
            UPDATE users
            SET name = $2, email = $3, preferred_language = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.preferred_language)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "Email already in use"))
    }

    // === Lesson Repository ===

    /// List lessons ordered by their sort order
    pub async fn list_lessons(
        &self,
        language_code: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DbLesson>> {
        let lessons = sqlx::query_as::<_, DbLesson>(&format!(
            r#"
            SELECT {LESSON_COLUMNS}
            FROM lessons
            WHERE ($1::TEXT IS NULL OR language_code = $1)
            ORDER BY sort_order, created_at
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(language_code)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(lessons)
    }

    /// Count lessons, optionally for one language
    pub async fn count_lessons(&self, language_code: Option<&str>) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM lessons
            WHERE ($1::TEXT IS NULL OR language_code = $1)
            "#,
        )
        .bind(language_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Get lesson by ID
    pub async fn get_lesson(&self, lesson_id: Uuid) -> Result<Option<DbLesson>> {
        let lesson = sqlx::query_as::<_, DbLesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1"
        ))
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lesson)
    }

    /// Insert a lesson
    pub async fn create_lesson(&self, lesson: &NewLesson) -> Result<DbLesson> {
        sqlx::query_as::<_, DbLesson>(&format!(
            r#"
            INSERT INTO lessons (title, description, language_code, content, expected_text,
                                 audio_example_url, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {LESSON_COLUMNS}
            "#
        ))
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(&lesson.language_code)
        .bind(&lesson.content)
        .bind(&lesson.expected_text)
        .bind(&lesson.audio_example_url)
        .bind(lesson.order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            ApiError::conflict_on_unique(e, "Lesson with this title already exists for that language")
        })
    }

    /// Overwrite a lesson's fields
    pub async fn update_lesson(&self, lesson: &DbLesson) -> Result<DbLesson> {
        sqlx::query_as::<_, DbLesson>(&format!(
            r#"
            UPDATE lessons
            SET title = $2, description = $3, language_code = $4, content = $5,
                expected_text = $6, audio_example_url = $7, sort_order = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {LESSON_COLUMNS}
            "#
        ))
        .bind(lesson.id)
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(&lesson.language_code)
        .bind(&lesson.content)
        .bind(&lesson.expected_text)
        .bind(&lesson.audio_example_url)
        .bind(lesson.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            ApiError::conflict_on_unique(e, "Another lesson with this title exists for that language")
        })
    }

    /// Delete a lesson
    pub async fn delete_lesson(&self, lesson_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clear a lesson's example audio reference
    pub async fn clear_lesson_audio(&self, lesson_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE lessons
            SET audio_example_url = '', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(lesson_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Submission Repository ===

    /// Insert a submission on the given connection (usually a transaction)
    pub async fn insert_submission(
        conn: &mut PgConnection,
        submission: &DbSubmission,
    ) -> Result<DbSubmission> {
        let inserted = sqlx::query_as::<_, DbSubmission>(
            r#"
            INSERT INTO audio_submissions (id, user_id, lesson_id, audio_ref, transcript,
                                           score, feedback_tier, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, lesson_id, audio_ref, transcript, score,
                      feedback_tier, submitted_at
            "#,
        )
        .bind(submission.id)
        .bind(submission.user_id)
        .bind(submission.lesson_id)
        .bind(&submission.audio_ref)
        .bind(&submission.transcript)
        .bind(submission.score)
        .bind(&submission.feedback_tier)
        .bind(submission.submitted_at)
        .fetch_one(conn)
        .await?;

        Ok(inserted)
    }

    /// Get submission by ID
    pub async fn get_submission(&self, submission_id: Uuid) -> Result<Option<DbSubmission>> {
        let submission = sqlx::query_as::<_, DbSubmission>(
            r#"
            SELECT id, user_id, lesson_id, audio_ref, transcript, score,
                   feedback_tier, submitted_at
            FROM audio_submissions
            WHERE id = $1
            "#,
        )
        .bind(submission_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(submission)
    }

    /// List submissions newest first, optionally filtered by user and lesson
    pub async fn list_submissions(
        &self,
        user_id: Option<Uuid>,
        lesson_id: Option<Uuid>,
    ) -> Result<Vec<DbSubmissionDetail>> {
        let submissions = sqlx::query_as::<_, DbSubmissionDetail>(
            r#"
            SELECT s.id, s.user_id, s.lesson_id, s.audio_ref, s.transcript, s.score,
                   s.feedback_tier, s.submitted_at,
                   l.title AS lesson_title, l.language_code,
                   u.name AS user_name, u.email AS user_email
            FROM audio_submissions s
            JOIN lessons l ON l.id = s.lesson_id
            JOIN users u ON u.id = s.user_id
            WHERE ($1::UUID IS NULL OR s.user_id = $1)
              AND ($2::UUID IS NULL OR s.lesson_id = $2)
            ORDER BY s.submitted_at DESC
            "#,
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(submissions)
    }

    /// Delete a submission
    pub async fn delete_submission(&self, submission_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM audio_submissions WHERE id = $1")
            .bind(submission_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Progress Repository ===

    /// Get the progress row for a (user, lesson) pair
    pub async fn get_progress(&self, user_id: Uuid, lesson_id: Uuid) -> Result<Option<DbProgress>> {
        let progress = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT id, user_id, lesson_id, completed, score, last_attempted,
                   created_at, updated_at
            FROM progress
            WHERE user_id = $1 AND lesson_id = $2
            "#,
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress)
    }

    /// List a user's progress, most recently attempted first
    pub async fn list_progress(&self, user_id: Uuid) -> Result<Vec<ProgressEntry>> {
        let entries = sqlx::query_as::<_, ProgressEntry>(
            r#"
            SELECT p.lesson_id, l.title AS lesson_title, l.language_code,
                   p.completed, p.score, p.last_attempted
            FROM progress p
            JOIN lessons l ON l.id = p.lesson_id
            WHERE p.user_id = $1
            ORDER BY p.last_attempted DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
