use std::sync::Arc;

use tracing::info;

use crate::{
    db::postgres::{create_pool, run_migrations},
    errors::AppError,
    repositories::{memory::InMemoryProjectRepo, project::SharedProjectRepo, sqlx_repo::SqlxProjectRepo},
    settings::{AppConfig, StoreBackend},
};

/// Opens the document store selected by `config.store`.
pub async fn open_project_store(config: &AppConfig) -> Result<SharedProjectRepo, AppError> {
    match config.store {
        StoreBackend::Postgres => {
            let pool = create_pool(&config.database_url, config.database_max_connections).await?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::StoreError(format!("Migration failed: {}", e)))?;

            info!("Using PostgreSQL project store");
            Ok(Arc::new(SqlxProjectRepo::new(pool)))
        }
        StoreBackend::Memory => {
            info!("Using in-memory project store; data is lost on shutdown");
            Ok(Arc::new(InMemoryProjectRepo::new()))
        }
    }
}
