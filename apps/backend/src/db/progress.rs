//! PostgreSQL-backed progress store.

use async_trait::async_trait;
use pronunciation_core::{ProgressRecord, ProgressStore, StoreError};
use sqlx::PgConnection;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::DbProgress;

const PROGRESS_COLUMNS: &str =
    "id, user_id, lesson_id, completed, score, last_attempted, created_at, updated_at";

/// Progress store bound to one connection, normally an open transaction.
///
/// `find` locks the row, so concurrent attempts on the same (user, lesson)
/// are serialized until the surrounding transaction ends.
pub struct PgProgressStore<'c> {
    conn: Mutex<&'c mut PgConnection>,
}

impl<'c> PgProgressStore<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl<'c> ProgressStore for PgProgressStore<'c> {
    async fn find(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
    ) -> pronunciation_core::Result<Option<ProgressRecord>> {
        let mut conn = self.conn.lock().await;
        let row = sqlx::query_as::<_, DbProgress>(&format!(
            r#"
            SELECT {PROGRESS_COLUMNS}
            FROM progress
            WHERE user_id = $1 AND lesson_id = $2
            FOR UPDATE
            "#
        ))
        .bind(user_id)
        .bind(lesson_id)
        .fetch_optional(&mut **conn)
        .await
        .map_err(unavailable)?;

        Ok(row.map(|r| r.to_core_record()))
    }

    async fn create(&self, record: &ProgressRecord) -> pronunciation_core::Result<ProgressRecord> {
        let mut conn = self.conn.lock().await;
        // DO NOTHING keeps the transaction usable when another writer won the insert.
        let row = sqlx::query_as::<_, DbProgress>(&format!(
            r#"
            INSERT INTO progress (user_id, lesson_id, completed, score, last_attempted)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, lesson_id) DO NOTHING
            RETURNING {PROGRESS_COLUMNS}
            "#
        ))
        .bind(record.user_id)
        .bind(record.lesson_id)
        .bind(record.completed)
        .bind(i32::from(record.score))
        .bind(record.last_attempted)
        .fetch_optional(&mut **conn)
        .await
        .map_err(unavailable)?;

        row.map(|r| r.to_core_record()).ok_or(StoreError::Conflict)
    }

    async fn update(&self, record: &ProgressRecord) -> pronunciation_core::Result<ProgressRecord> {
        let mut conn = self.conn.lock().await;
        let row = sqlx::query_as::<_, DbProgress>(&format!(
            r#"
            UPDATE progress
            SET completed = completed OR $3,
                score = GREATEST(score, $4),
                last_attempted = GREATEST(last_attempted, $5),
                updated_at = NOW()
            WHERE user_id = $1 AND lesson_id = $2
            RETURNING {PROGRESS_COLUMNS}
            "#
        ))
        .bind(record.user_id)
        .bind(record.lesson_id)
        .bind(record.completed)
        .bind(i32::from(record.score))
        .bind(record.last_attempted)
        .fetch_optional(&mut **conn)
        .await
        .map_err(unavailable)?;

        row.map(|r| r.to_core_record()).ok_or(StoreError::NotFound)
    }
}
