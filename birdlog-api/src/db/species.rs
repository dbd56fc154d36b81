//! Species reference list

use birdlog_common::db::Species;
use sqlx::SqlitePool;

pub struct SpeciesRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SpeciesRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Species>, sqlx::Error> {
        sqlx::query_as::<_, Species>("SELECT id, common_name FROM species ORDER BY common_name, id")
            .fetch_all(self.pool)
            .await
    }

    /// Species whose name contains `needle`, ignoring case.
    ///
    /// `instr` instead of `LIKE` so `%` and `_` in the needle match literally.
    pub async fn search(&self, needle: &str) -> Result<Vec<Species>, sqlx::Error> {
        sqlx::query_as::<_, Species>(
            "SELECT id, common_name FROM species
             WHERE instr(lower(common_name), lower(?)) > 0
             ORDER BY common_name, id",
        )
        .bind(needle)
        .fetch_all(self.pool)
        .await
    }
}
