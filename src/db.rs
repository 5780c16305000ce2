//! Database module - Postgres connection and schema for the record store

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await?;

    tracing::info!("Record store schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Keyed records (transactions by seller, feature records by user)
CREATE TABLE IF NOT EXISTS records (
    namespace VARCHAR(64) NOT NULL,
    set_name VARCHAR(64) NOT NULL,
    key_kind VARCHAR(8) NOT NULL,
    key_value TEXT NOT NULL,
    bins JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at TIMESTAMPTZ DEFAULT NOW(),
    updated_at TIMESTAMPTZ DEFAULT NOW(),
    PRIMARY KEY (namespace, set_name, key_kind, key_value)
);

CREATE INDEX IF NOT EXISTS idx_records_updated ON records(updated_at);
"#;
