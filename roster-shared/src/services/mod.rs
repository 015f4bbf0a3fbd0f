/// Business logic for Roster
///
/// # Services
///
/// - `user`: CRUD, department filters, free-text search, department statistics
/// - `category`: CRUD, name search, active filter
/// - `stats`: group-and-count helper
///
/// Services hold their store behind an `Arc` and are cheap to clone.

pub mod category;
pub mod stats;
pub mod user;

pub use category::CategoryService;
pub use user::UserService;
