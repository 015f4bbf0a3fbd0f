/// Configuration management for the Roster application
///
/// Configuration comes from environment variables (with an optional `.env`
/// file for development) and is turned into a type-safe struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string; users live in memory when unset
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `DATABASE_MIN_CONNECTIONS`: idle connections kept warm (default: 2)
/// - `DATABASE_CONNECT_TIMEOUT`: acquire timeout in seconds (default: 30)
/// - `RUN_MIGRATIONS`: apply embedded migrations on startup (default: true)
/// - `SEED_DEMO_DATA`: load the demo users and categories (default: false)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
/// - `RUST_LOG`: log filter
///
/// # Example
///
/// ```no_run
/// use roster_app::config::Config;
///
/// # fn example() -> Result<(), roster_app::error::AppError> {
/// let config = Config::from_env()?;
/// println!("Using {} user store", config.user_backend());
/// # Ok(())
/// # }
/// ```

use crate::error::{AppError, AppResult};
use roster_shared::db::pool::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL settings; `None` selects the in-memory user store
    pub database: Option<DatabaseConfig>,

    /// Startup behavior
    pub startup: StartupConfig,

    /// Log output format
    pub log_format: LogFormat,
}

/// What the application does while booting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Apply embedded migrations before using the database
    pub run_migrations: bool,

    /// Load the demo users and categories
    pub seed_demo_data: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,

    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}

/// Which user store the configuration selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserBackend {
    /// PostgreSQL via `PgUserStore`
    Postgres,

    /// `InMemoryUserStore`
    Memory,
}

impl fmt::Display for UserBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserBackend::Postgres => write!(f, "postgres"),
            UserBackend::Memory => write!(f, "memory"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            startup: StartupConfig {
                run_migrations: true,
                seed_demo_data: false,
            },
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// Reads `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable has an invalid value
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable has an invalid value
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();

        let database = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", defaults.min_connections)?,
                connect_timeout_seconds: parse_or(
                    &lookup,
                    "DATABASE_CONNECT_TIMEOUT",
                    defaults.connect_timeout_seconds,
                )?,
                ..defaults
            }),
            None => None,
        };

        if let Some(db) = &database {
            if db.min_connections > db.max_connections {
                return Err(AppError::Config(
                    "DATABASE_MIN_CONNECTIONS must not exceed DATABASE_MAX_CONNECTIONS".to_string(),
                ));
            }
        }

        let startup = StartupConfig {
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            seed_demo_data: parse_or(&lookup, "SEED_DEMO_DATA", false)?,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database,
            startup,
            log_format,
        })
    }

    /// The user store this configuration selects
    pub fn user_backend(&self) -> UserBackend {
        if self.database.is_some() {
            UserBackend::Postgres
        } else {
            UserBackend::Memory
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_use_memory_store() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert!(config.database.is_none());
        assert_eq!(config.user_backend(), UserBackend::Memory);
        assert!(config.startup.run_migrations);
        assert!(!config.startup.seed_demo_data);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/roster"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("DATABASE_MIN_CONNECTIONS", "1"),
        ]))
        .unwrap();

        let db = config.database.as_ref().unwrap();
        assert_eq!(db.url, "postgresql://localhost/roster");
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, 1);
        assert_eq!(db.connect_timeout_seconds, 30);
        assert_eq!(config.user_backend(), UserBackend::Postgres);
        assert_eq!(config.user_backend().to_string(), "postgres");
    }

    #[test]
    fn test_blank_database_url_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.database.is_none());
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/roster"),
            ("DATABASE_MAX_CONNECTIONS", "lots"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/roster"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("DATABASE_MIN_CONNECTIONS", "5"),
        ]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_startup_flags_and_log_format() {
        let config = Config::from_lookup(lookup_from(&[
            ("RUN_MIGRATIONS", "false"),
            ("SEED_DEMO_DATA", "true"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert!(!config.startup.run_migrations);
        assert!(config.startup.seed_demo_data);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
