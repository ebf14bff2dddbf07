//! Pronunciation scoring: percentage match and feedback tier.

use serde::{Deserialize, Serialize};

use crate::matching::levenshtein_distance;
use crate::normalize::{normalize, normalize_opt};
use crate::types::LessonText;

/// Lowest score that earns [`FeedbackTier::Excellent`].
pub const EXCELLENT_THRESHOLD: u8 = 90;
/// Lowest score that earns [`FeedbackTier::Good`].
pub const GOOD_THRESHOLD: u8 = 75;
/// Lowest score that earns [`FeedbackTier::Fair`].
pub const FAIR_THRESHOLD: u8 = 50;

/// Qualitative bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl FeedbackTier {
    /// Pick the tier for a score in `[0, 100]`.
    pub fn from_score(score: u8) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if score >= GOOD_THRESHOLD {
            Self::Good
        } else if score >= FAIR_THRESHOLD {
            Self::Fair
        } else {
            Self::NeedsPractice
        }
    }

    /// Message shown to the learner.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent pronunciation!",
            Self::Good => "Good job! Just a few small differences.",
            Self::Fair => "Not bad, but you can improve your pronunciation.",
            Self::NeedsPractice => "Keep practicing to get closer to the expected phrase.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsPractice => "needs_practice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "needs_practice" => Some(Self::NeedsPractice),
            _ => None,
        }
    }
}

/// Result of comparing a transcript to the expected phrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub distance: usize,
    /// Percentage match in `[0, 100]`.
    pub score: u8,
    pub feedback: FeedbackTier,
    pub expected_normalized: String,
    pub actual_normalized: String,
}

/// Score a spoken transcript against an expected phrase.
pub fn score(expected: &str, actual: &str) -> ScoreResult {
    let expected_normalized = normalize(expected);
    let actual_normalized = normalize(actual);
    score_normalized(expected_normalized, actual_normalized)
}

/// Score a transcript against a lesson's reference phrase.
///
/// A missing transcript counts as an empty one.
pub fn score_lesson(lesson: &LessonText, transcript: Option<&str>) -> ScoreResult {
    let expected_normalized = normalize(lesson.reference_phrase());
    let actual_normalized = normalize_opt(transcript);
    score_normalized(expected_normalized, actual_normalized)
}

fn score_normalized(expected_normalized: String, actual_normalized: String) -> ScoreResult {
    let max_len = expected_normalized.len().max(actual_normalized.len());

    let (distance, score) = if max_len == 0 {
        (0, 0)
    } else {
        let distance = levenshtein_distance(&actual_normalized, &expected_normalized);
        (distance, percentage(max_len, distance))
    };

    tracing::debug!(distance, score, max_len, "scored transcript");

    ScoreResult {
        distance,
        score,
        feedback: FeedbackTier::from_score(score),
        expected_normalized,
        actual_normalized,
    }
}

/// `round((max_len - distance) / max_len * 100)` in integer arithmetic,
/// rounding halves up, clamped to `[0, 100]`.
fn percentage(max_len: usize, distance: usize) -> u8 {
    let matched = max_len.saturating_sub(distance);
    let rounded = (matched * 200 + max_len) / (max_len * 2);
    // Upper clamp is unreachable while distance >= 0.
    rounded.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_both_empty_scores_zero() {
        let result = score("", "");
        assert_eq!(result.score, 0);
        assert_eq!(result.distance, 0);
        assert_eq!(result.feedback, FeedbackTier::NeedsPractice);
    }

    #[test]
    fn test_exact_match() {
        let result = score("hello world", "hello world");
        assert_eq!(result.score, 100);
        assert_eq!(result.feedback, FeedbackTier::Excellent);
        assert_eq!(result.feedback.message(), "Excellent pronunciation!");
    }

    #[test]
    fn test_small_differences() {
        let result = score("hello world", "helo wrld");
        assert_eq!(result.expected_normalized, "hello world");
        assert_eq!(result.actual_normalized, "helo wrld");
        assert_eq!(result.distance, 2);
        assert_eq!(result.score, 82);
        assert_eq!(result.feedback, FeedbackTier::Good);
        assert_eq!(result.feedback.message(), "Good job! Just a few small differences.");
    }

    #[test]
    fn test_punctuation_and_case_ignored() {
        let result = score("Hello, World!", "hello world");
        assert_eq!(result.score, 100);
        assert_eq!(result.distance, 0);
    }

    #[test]
    fn test_empty_transcript_scores_zero() {
        let result = score("good morning", "");
        assert_eq!(result.distance, 12);
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, FeedbackTier::NeedsPractice);
    }

    #[test]
    fn test_unrelated_phrase() {
        let result = score("abc", "xyz");
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_rounds_half_up() {
        // 7 of 8 characters match: 87.5 rounds to 88.
        assert_eq!(percentage(8, 1), 88);
        // 1 of 3: 33.33 rounds to 33.
        assert_eq!(percentage(3, 2), 33);
        // 2 of 3: 66.67 rounds to 67.
        assert_eq!(percentage(3, 1), 67);
        assert_eq!(percentage(11, 2), 82);
    }

    #[test]
    fn test_percentage_clamped() {
        assert_eq!(percentage(4, 9), 0);
        assert_eq!(percentage(4, 0), 100);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(FeedbackTier::from_score(100), FeedbackTier::Excellent);
        assert_eq!(FeedbackTier::from_score(90), FeedbackTier::Excellent);
        assert_eq!(FeedbackTier::from_score(89), FeedbackTier::Good);
        assert_eq!(FeedbackTier::from_score(75), FeedbackTier::Good);
        assert_eq!(FeedbackTier::from_score(74), FeedbackTier::Fair);
        assert_eq!(FeedbackTier::from_score(50), FeedbackTier::Fair);
        assert_eq!(FeedbackTier::from_score(49), FeedbackTier::NeedsPractice);
        assert_eq!(FeedbackTier::from_score(0), FeedbackTier::NeedsPractice);
    }

    #[test]
    fn test_tier_names_round_trip() {
        for tier in [
            FeedbackTier::Excellent,
            FeedbackTier::Good,
            FeedbackTier::Fair,
            FeedbackTier::NeedsPractice,
        ] {
            assert_eq!(FeedbackTier::from_str(tier.as_str()), Some(tier));
        }
    }

    #[test]
    fn test_score_lesson_uses_reference_phrase() {
        let lesson = LessonText::new("", "Mangwanani");
        let result = score_lesson(&lesson, Some("mangwanani"));
        assert_eq!(result.score, 100);

        let lesson = LessonText::new("Mhoro", "ignored content");
        let result = score_lesson(&lesson, None);
        assert_eq!(result.score, 0);
        assert_eq!(result.actual_normalized, "");
    }
}
