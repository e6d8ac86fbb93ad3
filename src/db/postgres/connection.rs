use crate::env_config::models::app_setting::AppSettings;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct PostgresConnection {
    pool: Pool<Postgres>,
}

impl PostgresConnection {
    pub async fn new(settings: Arc<AppSettings>) -> Result<Self, sqlx::Error> {
        info!("Initializing PostgreSQL connection...");

        let connection_string = format!(
            "postgres://{}:{}@{}/{}",
            settings.app_env.postgres_user,
            settings.app_env.postgres_password,
            settings.app_env.postgres_host,
            settings.app_env.postgres_database
        );

        let postgres = &settings.app_config.postgres;
        let pool = PgPoolOptions::new()
            .max_connections(postgres.max_connections)
            .min_connections(postgres.min_connections)
            .max_lifetime(Duration::from_secs(postgres.max_lifetime))
            .idle_timeout(Duration::from_secs(postgres.idle_timeout))
            .acquire_timeout(Duration::from_secs(postgres.timeout))
            .connect(&connection_string)
            .await?;

        debug!("Executing test query on PostgreSQL");
        match sqlx::query("SELECT 1").execute(&pool).await {
            Ok(_) => info!("PostgreSQL connection successful"),
            Err(e) => {
                error!("Failed to connect to PostgreSQL: {}", e);
                return Err(e);
            }
        }

        if postgres.run_migrations {
            info!("Running PostgreSQL migrations");
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("PostgreSQL migrations applied");
        }

        Ok(Self { pool })
    }

    /// Wraps an already migrated pool, as handed out by `#[sqlx::test]`
    #[cfg(test)]
    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn get_pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}
