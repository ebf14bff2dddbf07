//! Test fixtures and factory functions for request bodies.

use serde_json::json;
use uuid::Uuid;

fn short_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// Generate a unique email to avoid collisions between runs.
pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, short_id())
}

/// Generate a unique lesson title.
pub fn unique_title(prefix: &str) -> String {
    format!("{} {}", prefix, short_id())
}

/// Create a register request body.
pub fn register_request(name: &str, email: &str, language: Option<&str>) -> serde_json::Value {
    match language {
        Some(lang) => json!({ "name": name, "email": email, "preferred_language": lang }),
        None => json!({ "name": name, "email": email }),
    }
}

/// Create a lesson request body.
pub fn create_lesson_request(title: &str, language_code: &str, content: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Everyday phrases",
        "language_code": language_code,
        "content": content,
        "order": 1
    })
}

/// Create a voice submit request body.
pub fn submit_request(lesson_id: Uuid, transcript: Option<&str>) -> serde_json::Value {
    json!({
        "lesson_id": lesson_id,
        "transcript": transcript,
        "audio_ref": format!("uploads/{}.webm", short_id())
    })
}
