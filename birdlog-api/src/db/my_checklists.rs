//! User-owned checklists and their sightings
//!
//! Every query is scoped by `user_email`. A row that belongs to another
//! user behaves exactly like a missing row.

use birdlog_common::db::MyChecklist;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::forms::{ChecklistInput, Submission};

/// Identifiers of a newly stored checklist
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedChecklist {
    pub id: i64,
    pub sampling_event_id: String,
}

/// The columns the species statistics read
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Observation {
    pub observation_date: String,
    pub latitude: f64,
    pub longitude: f64,
    pub observation_count: i64,
}

const MY_CHECKLIST_COLUMNS: &str = "id, sampling_event_id, common_name, latitude, longitude, \
     observation_date, time_started, observer_id, duration_minutes, observation_count, \
     user_email, CAST(created_at AS TEXT) AS created_at";

pub struct MyChecklistRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MyChecklistRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All of a user's checklists, newest first
    pub async fn list_for_user(&self, user_email: &str) -> Result<Vec<MyChecklist>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM my_checklist WHERE user_email = ? ORDER BY id DESC",
            MY_CHECKLIST_COLUMNS
        );
        sqlx::query_as::<_, MyChecklist>(&sql)
            .bind(user_email)
            .fetch_all(self.pool)
            .await
    }

    /// One of the user's checklists by id
    pub async fn get(&self, user_email: &str, id: i64) -> Result<Option<MyChecklist>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM my_checklist WHERE id = ? AND user_email = ?",
            MY_CHECKLIST_COLUMNS
        );
        sqlx::query_as::<_, MyChecklist>(&sql)
            .bind(id)
            .bind(user_email)
            .fetch_optional(self.pool)
            .await
    }

    /// Store a checklist and one sighting per species entry in one transaction.
    ///
    /// All rows share a freshly generated sampling event id.
    pub async fn submit(
        &self,
        user_email: &str,
        submission: &Submission,
    ) -> Result<CreatedChecklist, sqlx::Error> {
        let sampling_event_id = Uuid::new_v4().to_string();
        let c = &submission.checklist;

        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO my_checklist (
                sampling_event_id, common_name, latitude, longitude, observation_date,
                time_started, observer_id, duration_minutes, observation_count, user_email
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&sampling_event_id)
        .bind(&c.common_name)
        .bind(c.latitude)
        .bind(c.longitude)
        .bind(&c.observation_date)
        .bind(&c.time_started)
        .bind(&c.observer_id)
        .bind(c.duration_minutes)
        .bind(c.observation_count)
        .bind(user_email)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for sighting in &submission.sightings {
            sqlx::query(
                "INSERT INTO sightings (sampling_event_id, common_name, observation_count)
                 VALUES (?, ?, ?)",
            )
            .bind(&sampling_event_id)
            .bind(&sighting.common_name)
            .bind(&sighting.observation_count)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(
            "Stored checklist {} ({}) with {} sightings",
            id,
            sampling_event_id,
            submission.sightings.len()
        );

        Ok(CreatedChecklist {
            id,
            sampling_event_id,
        })
    }

    /// Overwrite the editable fields. Returns false if the user owns no such row.
    pub async fn update(
        &self,
        user_email: &str,
        id: i64,
        input: &ChecklistInput,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE my_checklist SET
                common_name = ?,
                latitude = ?,
                longitude = ?,
                observation_date = ?,
                time_started = ?,
                observer_id = ?,
                duration_minutes = ?,
                observation_count = ?
            WHERE id = ? AND user_email = ?
            "#,
        )
        .bind(&input.common_name)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.observation_date)
        .bind(&input.time_started)
        .bind(&input.observer_id)
        .bind(input.duration_minutes)
        .bind(input.observation_count)
        .bind(id)
        .bind(user_email)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Remove a checklist and the sightings filed under its sampling event.
    /// Returns false if the user owns no such row.
    pub async fn delete(&self, user_email: &str, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let sampling_event_id: Option<String> = sqlx::query_scalar(
            "SELECT sampling_event_id FROM my_checklist WHERE id = ? AND user_email = ?",
        )
        .bind(id)
        .bind(user_email)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(sampling_event_id) = sampling_event_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM sightings WHERE sampling_event_id = ?")
            .bind(&sampling_event_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM my_checklist WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Distinct species names in a user's checklists, optionally filtered by
    /// a case-insensitive substring
    pub async fn distinct_names(
        &self,
        user_email: &str,
        needle: Option<&str>,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT common_name FROM my_checklist
             WHERE user_email = ?
               AND (? IS NULL OR instr(lower(common_name), lower(?)) > 0)
             ORDER BY common_name",
        )
        .bind(user_email)
        .bind(needle)
        .bind(needle)
        .fetch_all(self.pool)
        .await
    }

    /// Date, place and count of every checklist a user filed for one species
    pub async fn observations_of(
        &self,
        user_email: &str,
        common_name: &str,
    ) -> Result<Vec<Observation>, sqlx::Error> {
        sqlx::query_as::<_, Observation>(
            "SELECT observation_date, latitude, longitude,
                    COALESCE(observation_count, 0) AS observation_count
             FROM my_checklist
             WHERE user_email = ? AND common_name = ?
             ORDER BY id",
        )
        .bind(user_email)
        .bind(common_name)
        .fetch_all(self.pool)
        .await
    }
}
