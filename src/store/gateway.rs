use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Row};

use super::{Dialect, Statement};
use crate::config::DatabaseConfig;

// ============================================================================
// Store Gateway - Parameterized Query Execution
// ============================================================================
//
// Responsibilities:
// 1. Hold the pooled connection handle
// 2. Render statements for the configured dialect and bind their values
// 3. Return rows, single rows, counts, or affected-row counts
//
// Errors are returned verbatim; nothing is retried.
//
// ============================================================================

pub struct StoreGateway {
    pool: AnyPool,
    dialect: Dialect,
}

impl StoreGateway {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let dialect = Dialect::from_url(config.database_url()).ok_or_else(|| {
            sqlx::Error::Configuration(
                format!("unsupported database url scheme: {}", config.redacted_url()).into(),
            )
        })?;

        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections())
            .acquire_timeout(config.acquire_timeout())
            .connect(config.database_url())
            .await?;

        tracing::debug!(
            dialect = ?dialect,
            url = %config.redacted_url(),
            max_connections = config.max_connections(),
            "Connected to mail account database"
        );

        Ok(Self { pool, dialect })
    }

    /// Run a query and return every row
    pub async fn query(&self, stmt: &Statement) -> Result<Vec<AnyRow>, sqlx::Error> {
        let sql = self.dialect.render(stmt.sql());
        let mut query = sqlx::query(&sql);
        for value in stmt.binds() {
            query = query.bind(value.clone());
        }

        let rows = query.fetch_all(&self.pool).await?;
        tracing::debug!(sql = %sql, rows = rows.len(), "Query returned rows");
        Ok(rows)
    }

    /// Run a query expected to yield at most one row
    pub async fn query_row(&self, stmt: &Statement) -> Result<Option<AnyRow>, sqlx::Error> {
        let sql = self.dialect.render(stmt.sql());
        let mut query = sqlx::query(&sql);
        for value in stmt.binds() {
            query = query.bind(value.clone());
        }

        query.fetch_optional(&self.pool).await
    }

    /// Run a statement and return the number of affected rows
    pub async fn exec(&self, stmt: &Statement) -> Result<u64, sqlx::Error> {
        let sql = self.dialect.render(stmt.sql());
        let mut query = sqlx::query(&sql);
        for value in stmt.binds() {
            query = query.bind(value.clone());
        }

        let result = query.execute(&self.pool).await?;
        tracing::debug!(sql = %sql, affected = result.rows_affected(), "Statement executed");
        Ok(result.rows_affected())
    }

    /// Existence probe; `stmt` must select a single `COUNT(*)` column
    pub async fn exists(&self, stmt: &Statement) -> Result<bool, sqlx::Error> {
        let count: i64 = match self.query_row(stmt).await? {
            Some(row) => row.try_get(0usize)?,
            None => 0,
        };
        Ok(count > 0)
    }
}

/// Read a nullable text column, mapping NULL to an empty string
pub fn text_column(row: &AnyRow, column: &str) -> Result<String, sqlx::Error> {
    let value: Option<String> = row.try_get(column)?;
    Ok(value.unwrap_or_default())
}

// ============================================================================
// Unit Tests
// ============================================================================
