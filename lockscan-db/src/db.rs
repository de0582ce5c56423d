use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::models::DailyCursor;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cursors (
    day                         TEXT PRIMARY KEY,
    last_processed_round_count  INTEGER NOT NULL DEFAULT 0
);
";

const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lockscan.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Cannot open database {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Migration failed")?;
    Ok(())
}

/// A day that was never saved starts at zero processed rounds.
pub fn load_cursor(conn: &Connection, day: NaiveDate) -> Result<DailyCursor> {
    let key = day.format(DAY_FORMAT).to_string();
    let count: Option<u32> = conn
        .query_row(
            "SELECT last_processed_round_count FROM cursors WHERE day = ?1",
            [&key],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("Cannot read cursor for {}", key))?;
    Ok(DailyCursor {
        day,
        last_processed_round_count: count.unwrap_or(0),
    })
}

pub fn save_cursor(conn: &Connection, cursor: &DailyCursor) -> Result<()> {
    conn.execute(
        "INSERT INTO cursors (day, last_processed_round_count) VALUES (?1, ?2)
         ON CONFLICT(day) DO UPDATE SET last_processed_round_count = excluded.last_processed_round_count",
        rusqlite::params![
            cursor.day.format(DAY_FORMAT).to_string(),
            cursor.last_processed_round_count,
        ],
    ).context("Cannot save cursor")?;
    Ok(())
}

pub fn fetch_recent_cursors(conn: &Connection, limit: u32) -> Result<Vec<DailyCursor>> {
    let mut stmt = conn.prepare(
        "SELECT day, last_processed_round_count FROM cursors ORDER BY day DESC LIMIT ?1"
    )?;
    let rows = stmt.query_map([limit], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
    })?.collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(day, count)| -> Result<DailyCursor> {
            let day = NaiveDate::parse_from_str(&day, DAY_FORMAT)
                .with_context(|| format!("Invalid day stored in cursors: '{}'", day))?;
            Ok(DailyCursor {
                day,
                last_processed_round_count: count,
            })
        })
        .collect()
}
