/// Application state and bootstrap
///
/// [`App`] owns the two services and, when PostgreSQL is configured, the
/// connection pool behind the user store. It is cheap to clone.
///
/// # Example
///
/// ```no_run
/// use roster_app::{app::App, config::Config};
///
/// # async fn example() -> roster_app::error::AppResult<()> {
/// let config = Config::from_env()?;
/// let app = App::bootstrap(config).await?;
/// let names = app.users.user_names().await?;
/// println!("{} users", names.len());
/// app.shutdown().await;
/// # Ok(())
/// # }
/// ```

use crate::config::{Config, UserBackend};
use crate::error::AppResult;
use roster_shared::db::migrations::{get_migration_status, run_migrations};
use roster_shared::db::pool::{close_pool, create_pool};
use roster_shared::services::{CategoryService, UserService};
use roster_shared::store::{CategoryStore, InMemoryCategoryStore, InMemoryUserStore, PgUserStore, UserStore};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct App {
    /// User operations
    pub users: UserService<dyn UserStore>,

    /// Category operations
    pub categories: CategoryService<dyn CategoryStore>,

    /// Application configuration
    pub config: Arc<Config>,

    pool: Option<PgPool>,
}

impl App {
    /// Builds an application whose stores both live in memory
    pub fn in_memory(config: Config) -> Self {
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        Self::assemble(users, None, config)
    }

    /// Builds an application whose users live in PostgreSQL
    ///
    /// Categories always live in memory.
    pub fn with_pool(pool: PgPool, config: Config) -> Self {
        let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
        Self::assemble(users, Some(pool), config)
    }

    fn assemble(users: Arc<dyn UserStore>, pool: Option<PgPool>, config: Config) -> Self {
        let categories: Arc<dyn CategoryStore> = Arc::new(InMemoryCategoryStore::new());

        Self {
            users: UserService::new(users),
            categories: CategoryService::new(categories),
            config: Arc::new(config),
            pool,
        }
    }

    /// Builds the application the configuration describes
    ///
    /// With a database configured this connects, optionally applies
    /// migrations and wraps the pool in a [`PgUserStore`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or a migration fails
    pub async fn bootstrap(config: Config) -> AppResult<Self> {
        let Some(db_config) = config.database.clone() else {
            info!("No DATABASE_URL set, using in-memory user store");
            return Ok(Self::in_memory(config));
        };

        let pool = create_pool(db_config).await?;

        if config.startup.run_migrations {
            run_migrations(&pool).await?;
        } else {
            let status = get_migration_status(&pool).await?;
            if !status.is_up_to_date {
                warn!(
                    applied = status.applied_migrations,
                    latest = ?status.latest_version,
                    "Migrations are pending and RUN_MIGRATIONS is disabled"
                );
            }
        }

        info!("Using PostgreSQL user store");
        Ok(Self::with_pool(pool, config))
    }

    /// Which user store backs this application
    pub fn backend(&self) -> UserBackend {
        if self.pool.is_some() {
            UserBackend::Postgres
        } else {
            UserBackend::Memory
        }
    }

    /// Database pool, when PostgreSQL backs the user store
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Releases the database pool, if any
    pub async fn shutdown(self) {
        if let Some(pool) = self.pool {
            close_pool(pool).await;
        }
        info!("Roster shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_without_database_is_in_memory() {
        let app = App::bootstrap(Config::default()).await.unwrap();

        assert_eq!(app.backend(), UserBackend::Memory);
        assert!(app.pool().is_none());
        assert!(app.users.list_users().await.unwrap().is_empty());
        assert!(app.categories.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_stores() {
        let app = App::in_memory(Config::default());
        let clone = app.clone();

        clone
            .categories
            .create_category(roster_shared::models::category::Category::new("Books", "", true))
            .await
            .unwrap();

        assert_eq!(app.categories.list_categories().await.unwrap().len(), 1);
    }
}
