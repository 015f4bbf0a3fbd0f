/// Database layer for Roster
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: embedded schema migrations
///
/// The user store built on top of the pool is `crate::store::PgUserStore`.

pub mod migrations;
pub mod pool;
