//! Core types shared by the scoring pipeline and the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::FeedbackTier;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Self::Student
    }
}

impl Role {
    /// Get the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Languages a learner can pick as their preferred language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "shona")]
    Shona,
    #[serde(rename = "ndebele")]
    Ndebele,
    #[serde(rename = "kalanga")]
    Kalanga,
    #[serde(rename = "venda")]
    Venda,
    #[serde(rename = "sotho-tonga")]
    SothoTonga,
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Shona => "shona",
            Self::Ndebele => "ndebele",
            Self::Kalanga => "kalanga",
            Self::Venda => "venda",
            Self::SothoTonga => "sotho-tonga",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "en" => Some(Self::English),
            "shona" => Some(Self::Shona),
            "ndebele" => Some(Self::Ndebele),
            "kalanga" => Some(Self::Kalanga),
            "venda" => Some(Self::Venda),
            "sotho-tonga" => Some(Self::SothoTonga),
            _ => None,
        }
    }
}

/// The text fields of a lesson that a spoken attempt is compared against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonText {
    pub expected_text: String,
    pub content: String,
}

impl LessonText {
    pub fn new(expected_text: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            expected_text: expected_text.into(),
            content: content.into(),
        }
    }

    /// The phrase a learner is expected to say.
    ///
    /// Precedence: `expected_text` when it is non-blank, otherwise `content`
    /// (which may itself be empty).
    pub fn reference_phrase(&self) -> &str {
        if self.expected_text.trim().is_empty() {
            &self.content
        } else {
            &self.expected_text
        }
    }
}

/// A recorded voice-practice attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub audio_ref: String,
    /// Transcript exactly as received from the recognizer.
    pub transcript: String,
    pub score: u8,
    pub feedback: String,
    pub feedback_tier: FeedbackTier,
    pub submitted_at: DateTime<Utc>,
}
