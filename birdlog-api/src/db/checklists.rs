//! Community checklists imported from seed data (read-only)

use birdlog_common::db::Checklist;
use sqlx::SqlitePool;

pub struct ReferenceChecklistRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReferenceChecklistRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM checklist")
            .fetch_one(self.pool)
            .await
    }

    pub async fn page(&self, limit: i64, offset: i64) -> Result<Vec<Checklist>, sqlx::Error> {
        sqlx::query_as::<_, Checklist>(
            "SELECT id, sampling_event_id, latitude, longitude, observation_date,
                    time_started, observer_id, duration_minutes
             FROM checklist
             ORDER BY id
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await
    }
}
