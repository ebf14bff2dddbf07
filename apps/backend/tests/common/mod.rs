//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating users and lessons
//! - Authentication helpers
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use voice_practice_backend::db::Database;
use voice_practice_backend::models::{DbLesson, Language, NewLesson, Role};
use voice_practice_backend::services::tokens::{generate_token, hash_token};
use voice_practice_backend::{build_router, AppState};

/// Test context containing database connection and router.
///
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);
        let app = build_router(AppState { db: db.clone() });

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    async fn create_user_with_role(&self, role: Role) -> (Uuid, String) {
        let token = generate_token();
        let email = fixtures::unique_email(role.as_str());
        let user = self
            .db
            .create_user("Test User", &email, Language::English, role, &hash_token(&token))
            .await
            .expect("Failed to create test user");
        (user.id, token)
    }

    /// Create a student and return its ID and token.
    pub async fn create_test_user(&self) -> (Uuid, String) {
        self.create_user_with_role(Role::Student).await
    }

    /// Create an admin and return its ID and token.
    pub async fn create_admin(&self) -> (Uuid, String) {
        self.create_user_with_role(Role::Admin).await
    }

    /// Create a lesson with a unique title.
    pub async fn create_test_lesson(&self, expected_text: &str) -> DbLesson {
        let lesson = NewLesson {
            title: fixtures::unique_title("Lesson"),
            description: "Test lesson".to_string(),
            language_code: "en".to_string(),
            content: expected_text.to_string(),
            expected_text: expected_text.to_string(),
            audio_example_url: String::new(),
            order: 0,
        };
        self.db
            .create_lesson(&lesson)
            .await
            .expect("Failed to create test lesson")
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Count the audio submissions stored for a user.
    pub async fn count_submissions(&self, user_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM audio_submissions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count submissions")
    }

    /// Make every progress write for one lesson fail until
    /// `restore_progress_writes` is called.
    pub async fn fail_progress_writes(&self, lesson_id: Uuid) {
        let suffix = lesson_id.simple();
        let statements = [
            format!(
                r#"
                CREATE OR REPLACE FUNCTION reject_progress_{suffix}() RETURNS trigger AS $$
                BEGIN
                    IF NEW.lesson_id = '{lesson_id}'::uuid THEN
                        RAISE EXCEPTION 'progress writes disabled for lesson {lesson_id}';
                    END IF;
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql
                "#
            ),
            format!(
                r#"
                CREATE TRIGGER reject_progress_{suffix}
                BEFORE INSERT OR UPDATE ON progress
                FOR EACH ROW EXECUTE FUNCTION reject_progress_{suffix}()
                "#
            ),
        ];

        for sql in &statements {
            sqlx::query(sql)
                .execute(self.db.pool())
                .await
                .expect("Failed to install progress trigger");
        }
    }

    /// Undo `fail_progress_writes`.
    pub async fn restore_progress_writes(&self, lesson_id: Uuid) {
        let suffix = lesson_id.simple();
        let _ = sqlx::query(&format!(
            "DROP TRIGGER IF EXISTS reject_progress_{suffix} ON progress"
        ))
        .execute(self.db.pool())
        .await;
        let _ = sqlx::query(&format!("DROP FUNCTION IF EXISTS reject_progress_{suffix}()"))
            .execute(self.db.pool())
            .await;
    }

    /// Remove a user; submissions and progress go with it.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }

    /// Remove a lesson; submissions and progress go with it.
    pub async fn cleanup_lesson(&self, lesson_id: Uuid) {
        let _ = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(self.db.pool())
            .await;
    }
}
