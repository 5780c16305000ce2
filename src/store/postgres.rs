//! Postgres-backed record store

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use super::{Bins, RecordKey, RecordStore, StoreError};

#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn put(&self, namespace: &str, set: &str, key: &RecordKey, bins: &Bins) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO records (namespace, set_name, key_kind, key_value, bins)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (namespace, set_name, key_kind, key_value) DO UPDATE SET
                bins = records.bins || EXCLUDED.bins,
                updated_at = NOW()
            "#
        )
        .bind(namespace)
        .bind(set)
        .bind(key.kind())
        .bind(key.value())
        .bind(Json(bins))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, namespace: &str, set: &str, key: &RecordKey) -> Result<Bins, StoreError> {
        let row: Option<Json<Bins>> = sqlx::query_scalar(
            r#"
            SELECT bins FROM records
            WHERE namespace = $1 AND set_name = $2 AND key_kind = $3 AND key_value = $4
            "#
        )
        .bind(namespace)
        .bind(set)
        .bind(key.kind())
        .bind(key.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|Json(bins)| bins)
            .ok_or_else(|| StoreError::not_found(namespace, set, key))
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Record store connections closed");
    }
}
