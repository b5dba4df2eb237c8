use crate::config::DatabaseConfig;
use crate::entities::{factor, factor_hecho, hecho};
use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::catalog::NewFactorHecho;
pub use repositories::user::{UpdateOutcome, User, UserChanges};

/// Constraint violations the services translate into client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
}

/// Inspects a repository error for a storage-level constraint violation.
#[must_use]
pub fn constraint_violation(err: &anyhow::Error) -> Option<ConstraintViolation> {
    match err.downcast_ref::<DbErr>()?.sql_err()? {
        SqlErr::UniqueConstraintViolation(_) => Some(ConstraintViolation::Unique),
        SqlErr::ForeignKeyConstraintViolation(_) => Some(ConstraintViolation::ForeignKey),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let url = config.connection_url()?;
        info!("Connecting to database at {}", config.redacted_url());

        Self::with_pool_options(
            &url,
            config.max_connections,
            config.min_connections,
            Duration::from_secs(config.connect_timeout_seconds),
            config.run_migrations,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
        connect_timeout: Duration,
        run_migrations: bool,
    ) -> Result<Self> {
        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(connect_timeout)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .context("Failed to connect to database")?;

        let store = Self { conn };

        if run_migrations {
            store.migrate().await?;
        }

        info!(
            "Database connected (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::up(&self.conn, None)
            .await
            .context("Failed to apply migrations")?;
        info!("Migrations applied");
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn create_factor(&self, nombre: String, categoria: String) -> Result<factor::Model> {
        self.catalog_repo().create_factor(nombre, categoria).await
    }

    pub async fn create_hecho(&self, descripcion: String) -> Result<hecho::Model> {
        self.catalog_repo().create_hecho(descripcion).await
    }

    pub async fn create_factor_hecho(&self, input: NewFactorHecho) -> Result<factor_hecho::Model> {
        self.catalog_repo().create_factor_hecho(input).await
    }

    pub async fn list_factors_with_values(
        &self,
    ) -> Result<Vec<(factor::Model, Vec<factor_hecho::Model>)>> {
        self.catalog_repo().list_factors_with_values().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email_with_password(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>> {
        self.user_repo().get_by_email_with_password(email).await
    }

    pub async fn user_exists(&self, email: &str, name: &str) -> Result<bool> {
        self.user_repo().exists_by_email_or_name(email, name).await
    }

    pub async fn insert_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        self.user_repo().insert(name, email, password_hash).await
    }

    pub async fn update_user(&self, id: i32, changes: UserChanges) -> Result<UpdateOutcome> {
        self.user_repo().update(id, changes).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }
}
