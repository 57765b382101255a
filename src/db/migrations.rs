//! Embedded schema migrations, applied in order and recorded by name.

use rusqlite::{Connection, OptionalExtension};

/// Every migration the settings database knows about.
const MIGRATIONS: &[(&str, &str)] = &[
    ("001_initial", include_str!("sql/001_initial.sql")),
    ("002_local_models", include_str!("sql/002_local_models.sql")),
];

fn is_applied(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row("SELECT 1 FROM migrations WHERE name = ?1", [name], |_| Ok(()))
        .optional()
        .map(|row| row.is_some())
}

/// Apply any migration not yet recorded. Each one commits on its own.
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER DEFAULT (unixepoch())
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        if is_applied(conn, name)? {
            continue;
        }
        tracing::info!(migration = name, "Applying migration");
        let batch = format!(
            "BEGIN;\n{}\nINSERT INTO migrations (name) VALUES ('{}');\nCOMMIT;",
            sql, name
        );
        if let Err(e) = conn.execute_batch(&batch) {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(anyhow::anyhow!("Migration {} failed: {}", name, e));
        }
    }

    Ok(())
}
