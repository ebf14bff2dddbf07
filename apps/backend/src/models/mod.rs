//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from pronunciation-core
pub use pronunciation_core::{
    FeedbackTier, Language, LessonText, ProgressRecord, Role, Submission,
};

// === Database Entity Types ===

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub preferred_language: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl DbUser {
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or_default()
    }

    /// Convert to API user type
    pub fn to_api_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            preferred_language: Language::from_str(&self.preferred_language).unwrap_or_default(),
            role: self.role(),
            created_at: self.created_at,
        }
    }
}

/// Lesson stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLesson {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub language_code: String,
    pub content: String,
    pub expected_text: String,
    pub audio_example_url: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbLesson {
    /// The fields a spoken attempt is scored against.
    pub fn lesson_text(&self) -> LessonText {
        LessonText::new(self.expected_text.clone(), self.content.clone())
    }

    /// Convert to API lesson type
    pub fn to_api_lesson(&self) -> Lesson {
        Lesson {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            language_code: self.language_code.clone(),
            content: self.content.clone(),
            expected_text: self.expected_text.clone(),
            audio_example_url: self.audio_example_url.clone(),
            order: self.sort_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Voice submission in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubmission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub audio_ref: String,
    pub transcript: String,
    pub score: i32,
    pub feedback_tier: String,
    pub submitted_at: DateTime<Utc>,
}

impl DbSubmission {
    /// Convert to API submission type
    pub fn to_api_submission(&self) -> Submission {
        let score = self.score.clamp(0, 100) as u8;
        let feedback_tier =
            FeedbackTier::from_str(&self.feedback_tier).unwrap_or_else(|| FeedbackTier::from_score(score));

        Submission {
            id: self.id,
            user_id: self.user_id,
            lesson_id: self.lesson_id,
            audio_ref: self.audio_ref.clone(),
            transcript: self.transcript.clone(),
            score,
            feedback: feedback_tier.message().to_string(),
            feedback_tier,
            submitted_at: self.submitted_at,
        }
    }
}

/// Submission joined with its lesson and submitting user
#[derive(Debug, Clone, FromRow)]
pub struct DbSubmissionDetail {
    #[sqlx(flatten)]
    pub submission: DbSubmission,
    pub lesson_title: String,
    pub language_code: String,
    pub user_name: String,
    pub user_email: String,
}

impl DbSubmissionDetail {
    /// Convert to API summary; user details are only included for admin listings.
    pub fn to_summary(&self, include_user: bool) -> SubmissionSummary {
        SubmissionSummary {
            submission: self.submission.to_api_submission(),
            lesson_title: self.lesson_title.clone(),
            language_code: self.language_code.clone(),
            user_name: include_user.then(|| self.user_name.clone()),
            user_email: include_user.then(|| self.user_email.clone()),
        }
    }
}

/// Progress row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub completed: bool,
    pub score: i32,
    pub last_attempted: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbProgress {
    /// Convert to pronunciation-core ProgressRecord
    pub fn to_core_record(&self) -> ProgressRecord {
        ProgressRecord {
            user_id: self.user_id,
            lesson_id: self.lesson_id,
            completed: self.completed,
            score: self.score.clamp(0, 100) as u8,
            last_attempted: self.last_attempted,
        }
    }
}

/// Progress with lesson info for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressEntry {
    pub lesson_id: Uuid,
    pub lesson_title: String,
    pub language_code: String,
    pub completed: bool,
    pub score: i32,
    pub last_attempted: DateTime<Utc>,
}

// === API Types ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub preferred_language: Language,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub language_code: String,
    pub content: String,
    pub expected_text: String,
    pub audio_example_url: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    #[serde(flatten)]
    pub submission: Submission,
    pub lesson_title: String,
    pub language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

// User types
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub preferred_language: Option<Language>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub preferred_language: Option<Language>,
}

// Lesson types
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LessonListQuery {
    pub language_code: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl LessonListQuery {
    /// 1-based page number.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LessonListResponse {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language_code: Option<String>,
    pub content: Option<String>,
    pub expected_text: Option<String>,
    pub audio_example_url: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language_code: Option<String>,
    pub content: Option<String>,
    pub expected_text: Option<String>,
    pub audio_example_url: Option<String>,
    pub order: Option<i32>,
}

/// Fields for inserting a lesson, already validated.
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub title: String,
    pub description: String,
    pub language_code: String,
    pub content: String,
    pub expected_text: String,
    pub audio_example_url: String,
    pub order: i32,
}

// Voice types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmitAudioRequest {
    pub lesson_id: Option<Uuid>,
    pub transcript: Option<String>,
    pub audio_ref: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmissionQuery {
    pub lesson_id: Option<Uuid>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AllSubmissionsQuery {
    pub lesson_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
