use std::path::Path;

use rusqlite::Connection;

use super::repository::{insert_disease, NewDisease};
use super::CorpusError;

/// Open a SQLite corpus at the given path and run migrations.
pub fn open_corpus_database(path: &Path) -> Result<Connection, CorpusError> {
    let conn = Connection::open(path).map_err(|e| CorpusError::Unavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory corpus (for testing).
pub fn open_memory_corpus_database() -> Result<Connection, CorpusError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), CorpusError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), CorpusError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![(
        1,
        include_str!("../../resources/migrations/001_corpus.sql"),
    )];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running corpus migration v{version}");
            conn.execute_batch(sql)
                .map_err(|e| CorpusError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet).
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, i64>(0)
    })
    .unwrap_or(0)
}

/// Seed the bundled disease reference set when the corpus is empty.
/// Returns the number of records inserted.
pub fn seed_default_diseases(conn: &Connection) -> Result<usize, CorpusError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM diseases", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(0);
    }

    let seeds: Vec<NewDisease> = serde_json::from_str(include_str!("../../resources/diseases.json"))
        .expect("bundled disease seed is valid JSON");

    let seeded = seeds.len();
    for seed in &seeds {
        insert_disease(conn, seed)?;
    }

    tracing::info!(seeded, "Seeded default disease corpus");
    Ok(seeded)
}
