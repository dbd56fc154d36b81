//! CSV seed import for the reference tables
//!
//! Loads `species.csv`, `sightings.csv` and `checklists.csv` into their
//! tables. A table that already has rows is left alone, so running the
//! import twice inserts nothing the second time. Each table loads in its own
//! transaction.
//!
//! Headers are matched loosely: case-insensitive, an optional `table.`
//! prefix is dropped and spaces count as underscores. `checklist.LATITUDE`,
//! `LATITUDE` and `latitude` all name the same column.

use crate::{Error, Result};
use csv::StringRecord;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Reference tables that can be seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedTable {
    Species,
    Sightings,
    Checklist,
}

impl SeedTable {
    /// Import order
    pub const ALL: [SeedTable; 3] = [SeedTable::Species, SeedTable::Sightings, SeedTable::Checklist];

    pub fn table_name(self) -> &'static str {
        match self {
            SeedTable::Species => "species",
            SeedTable::Sightings => "sightings",
            SeedTable::Checklist => "checklist",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SeedTable::Species => "species.csv",
            SeedTable::Sightings => "sightings.csv",
            SeedTable::Checklist => "checklists.csv",
        }
    }
}

/// Result of seeding one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Rows inserted from the file
    Imported(usize),
    /// Table already had rows; file not read
    AlreadyPopulated,
    /// Seed file does not exist
    MissingFile,
}

/// Seed every reference table from `seed_dir`
pub async fn seed_all(pool: &SqlitePool, seed_dir: &Path) -> Result<Vec<(SeedTable, SeedOutcome)>> {
    let mut outcomes = Vec::with_capacity(SeedTable::ALL.len());

    for table in SeedTable::ALL {
        let path = seed_dir.join(table.file_name());
        let outcome = seed_table(pool, table, &path).await?;
        outcomes.push((table, outcome));
    }

    Ok(outcomes)
}

/// Seed one table from a CSV file if the table is empty
pub async fn seed_table(pool: &SqlitePool, table: SeedTable, path: &Path) -> Result<SeedOutcome> {
    if !table_is_empty(pool, table).await? {
        info!("Table '{}' already populated, skipping seed", table.table_name());
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    if !path.exists() {
        warn!(
            "Seed file for '{}' not found: {}",
            table.table_name(),
            path.display()
        );
        return Ok(SeedOutcome::MissingFile);
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = HeaderMap::new(reader.headers()?);
    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for record in &records {
        let written = match table {
            SeedTable::Species => insert_species(&mut tx, &headers, record).await?,
            SeedTable::Sightings => insert_sighting(&mut tx, &headers, record).await?,
            SeedTable::Checklist => insert_checklist(&mut tx, &headers, record).await?,
        };
        if written {
            inserted += 1;
        }
    }

    tx.commit().await?;

    let skipped = records.len() - inserted;
    if skipped > 0 {
        warn!(
            "Skipped {} rows without a key column in {}",
            skipped,
            path.display()
        );
    }
    info!(
        "Seeded '{}' with {} rows from {}",
        table.table_name(),
        inserted,
        path.display()
    );

    Ok(SeedOutcome::Imported(inserted))
}

async fn table_is_empty(pool: &SqlitePool, table: SeedTable) -> Result<bool> {
    // Table name comes from a closed enum, never from input
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {})", table.table_name());
    let has_rows: bool = sqlx::query_scalar(&sql).fetch_one(pool).await?;
    Ok(!has_rows)
}

type Tx<'a> = sqlx::Transaction<'a, sqlx::Sqlite>;

async fn insert_species(tx: &mut Tx<'_>, headers: &HeaderMap, record: &StringRecord) -> Result<bool> {
    let Some(common_name) = headers.text(record, &["common_name"]) else {
        return Ok(false);
    };

    sqlx::query("INSERT INTO species (common_name) VALUES (?)")
        .bind(common_name)
        .execute(&mut **tx)
        .await?;

    Ok(true)
}

async fn insert_sighting(tx: &mut Tx<'_>, headers: &HeaderMap, record: &StringRecord) -> Result<bool> {
    let (Some(event_id), Some(common_name)) = (
        headers.text(record, SAMPLING_EVENT_COLUMNS),
        headers.text(record, &["common_name"]),
    ) else {
        return Ok(false);
    };

    sqlx::query(
        "INSERT INTO sightings (sampling_event_id, common_name, observation_count) VALUES (?, ?, ?)",
    )
    .bind(event_id)
    .bind(common_name)
    .bind(headers.text(record, &["observation_count"]))
    .execute(&mut **tx)
    .await?;

    Ok(true)
}

async fn insert_checklist(tx: &mut Tx<'_>, headers: &HeaderMap, record: &StringRecord) -> Result<bool> {
    let Some(event_id) = headers.text(record, SAMPLING_EVENT_COLUMNS) else {
        return Ok(false);
    };

    sqlx::query(
        r#"
        INSERT INTO checklist (
            sampling_event_id, latitude, longitude, observation_date,
            time_started, observer_id, duration_minutes
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(event_id)
    .bind(headers.number(record, &["latitude"])?)
    .bind(headers.number(record, &["longitude"])?)
    .bind(headers.text(record, &["observation_date"]))
    .bind(headers.text(record, &["time_observations_started", "time_started"]))
    .bind(headers.text(record, &["observer_id"]))
    .bind(headers.number(record, &["duration_minutes"])?)
    .execute(&mut **tx)
    .await?;

    Ok(true)
}

const SAMPLING_EVENT_COLUMNS: &[&str] = &["sampling_event_identifier", "sampling_event_id"];

/// Column lookup by normalized header name
struct HeaderMap {
    indices: HashMap<String, usize>,
}

impl HeaderMap {
    fn new(headers: &StringRecord) -> Self {
        let indices = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (normalize_header(h), i))
            .collect();
        Self { indices }
    }

    /// First non-empty value among the candidate column names
    fn text<'r>(&self, record: &'r StringRecord, names: &[&str]) -> Option<&'r str> {
        names
            .iter()
            .filter_map(|name| self.indices.get(*name))
            .filter_map(|&i| record.get(i))
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    fn number(&self, record: &StringRecord, names: &[&str]) -> Result<Option<f64>> {
        let Some(raw) = self.text(record, names) else {
            return Ok(None);
        };
        raw.parse::<f64>().map(Some).map_err(|_| {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            Error::InvalidInput(format!("line {}: '{}' is not a number ({})", line, raw, names[0]))
        })
    }
}

/// `checklist.TIME OBSERVATIONS STARTED` -> `time_observations_started`
fn normalize_header(header: &str) -> String {
    let header = header.trim().trim_start_matches('\u{feff}');
    let column = header.rsplit('.').next().unwrap_or(header);
    column.trim().to_lowercase().replace(' ', "_")
}
