use crate::store::EMPLOYEES_TABLE;
use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Leading characters covered by the secondary text indexes.
const INDEX_PREFIX_CHARS: usize = 191;

/// Creates the employee table if it does not exist yet. No migrations.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<()> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            sex TEXT NULL,
            email VARCHAR(768) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
            date_of_birth DATE NOT NULL,
            job_title TEXT NOT NULL,
            UNIQUE KEY uq_{table}_email (email),
            KEY ix_{table}_first_name (first_name({prefix})),
            KEY ix_{table}_last_name (last_name({prefix})),
            KEY ix_{table}_sex (sex({prefix})),
            KEY ix_{table}_job_title (job_title({prefix}))
        )
        "#,
        table = EMPLOYEES_TABLE,
        prefix = INDEX_PREFIX_CHARS
    );

    sqlx::query(&ddl)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to create table {}", EMPLOYEES_TABLE))?;

    info!(table = EMPLOYEES_TABLE, "Schema ready");
    Ok(())
}
