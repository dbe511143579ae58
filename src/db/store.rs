//! Pool construction, schema application, and one-time seeding.
//!
//! These run in the database actor's `pre_start`; any failure here aborts
//! startup so the process never serves traffic against a broken store.

use crate::db::schema::SQLITE_INIT;
use crate::db::seed::{INITIAL_ACTIVITIES, SeedActivity};
use crate::error::RosterError;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{SqliteConnection, SqlitePool};
use std::{str::FromStr, time::Duration};
use tracing::info;

/// Builds the SQLite pool for the configured database URL.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RosterError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| RosterError::Connection(format!("invalid database url: {e}")))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .connect_with(connect_opts)
        .await
        .map_err(|e| RosterError::Connection(format!("db connect failed: {e}")))
}

/// Applies the DDL. Idempotent; safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RosterError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s)
            .execute(pool)
            .await
            .map_err(|e| RosterError::Schema(format!("db schema init failed: {e}")))?;
    }
    Ok(())
}

/// Inserts the starter dataset when the `activities` table is empty.
/// Returns whether this call did the seeding.
///
/// The count check and inserts share one IMMEDIATE transaction: the write
/// lock is taken before the count is read, so a concurrent seeder queues on
/// the busy timeout and then observes the committed rows instead of
/// upgrading a stale read snapshot mid-insert. The UNIQUE(name) catch
/// remains as a fallback for stores not running in WAL mode.
pub async fn seed_if_empty(
    pool: &SqlitePool,
    sample_data: &[SeedActivity],
) -> Result<bool, RosterError> {
    match try_seed(pool, sample_data).await {
        Ok(seeded) => Ok(seeded),
        Err(RosterError::DatabaseError(e))
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation()) =>
        {
            info!("seed lost the startup race; store already populated");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

async fn try_seed(pool: &SqlitePool, sample_data: &[SeedActivity]) -> Result<bool, RosterError> {
    let mut conn = pool.acquire().await?;

    sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

    match seed_in_tx(&mut conn, sample_data).await {
        Ok(true) => {
            sqlx::query("COMMIT").execute(&mut *conn).await?;
            info!(activities = sample_data.len(), "seeded initial activities");
            Ok(true)
        }
        Ok(false) => {
            sqlx::query("ROLLBACK").execute(&mut *conn).await?;
            Ok(false)
        }
        Err(e) => {
            let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
            Err(e)
        }
    }
}

async fn seed_in_tx(
    conn: &mut SqliteConnection,
    sample_data: &[SeedActivity],
) -> Result<bool, RosterError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities")
        .fetch_one(&mut *conn)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    let now = Utc::now();
    for activity in sample_data {
        let activity_id: i64 = sqlx::query_scalar(
            r"
        INSERT INTO activities (name, description, schedule, max_participants, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        ",
        )
        .bind(activity.name)
        .bind(activity.description)
        .bind(activity.schedule)
        .bind(activity.max_participants)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        for email in activity.participants {
            let participant_id: i64 = sqlx::query_scalar(
                r"
            INSERT INTO participants (email, created_at)
            VALUES (?, ?)
            ON CONFLICT(email) DO UPDATE SET email = excluded.email
            RETURNING id
            ",
            )
            .bind(email)
            .bind(now)
            .fetch_one(&mut *conn)
            .await?;

            sqlx::query(
                "INSERT INTO activity_participants (activity_id, participant_id) VALUES (?, ?)",
            )
            .bind(activity_id)
            .bind(participant_id)
            .execute(&mut *conn)
            .await?;
        }
    }

    Ok(true)
}

/// Convenience wrapper seeding the built-in starter dataset.
pub async fn seed_initial(pool: &SqlitePool) -> Result<bool, RosterError> {
    seed_if_empty(pool, INITIAL_ACTIVITIES).await
}
