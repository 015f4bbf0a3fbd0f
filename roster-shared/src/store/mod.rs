/// Data-access layer for Roster
///
/// This module defines the store contracts the services are written against
/// and the implementations that back them.
///
/// # Stores
///
/// - [`UserStore`]: users, backed by PostgreSQL ([`PgUserStore`]) or memory
///   ([`InMemoryUserStore`])
/// - [`CategoryStore`]: categories, backed by memory ([`InMemoryCategoryStore`])
///
/// Every store guarantees read-your-writes: a successful `insert`/`save` is
/// visible to the next read issued by the same caller.
///
/// # Example
///
/// ```
/// use roster_shared::store::{InMemoryUserStore, UserStore};
/// use roster_shared::models::user::NewUser;
///
/// # async fn example() -> Result<(), roster_shared::store::StoreError> {
/// let store = InMemoryUserStore::new();
/// let user = store
///     .insert(NewUser {
///         name: "John Doe".to_string(),
///         email: "john@example.com".to_string(),
///         department: "Engineering".to_string(),
///         active: true,
///     })
///     .await?;
///
/// assert!(store.exists_by_id(user.id).await?);
/// # Ok(())
/// # }
/// ```

pub mod memory_category;
pub mod memory_user;
pub mod pg_user;

pub use memory_category::InMemoryCategoryStore;
pub use memory_user::InMemoryUserStore;
pub use pg_user::PgUserStore;

use crate::models::{category::Category, user::{NewUser, User}};
use async_trait::async_trait;

/// Store error types
///
/// Not-found is never an error: lookups return `Option` and deletes return
/// `bool`. These variants cover failures of the store itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An entity with this ID already exists
    #[error("Duplicate id: {0}")]
    DuplicateId(i64),

    /// Another user already has this email address
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Every ID above the highest one in use is taken
    #[error("No free IDs left")]
    IdSpaceExhausted,
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for users
///
/// Each query method corresponds to one explicit predicate so that
/// implementations can push the filter down to the database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ordered by ID
    async fn find_all(&self) -> StoreResult<Vec<User>>;

    /// User with this ID, if any
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// User with this exact email, if any
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Users whose department equals `department` (case-sensitive)
    async fn find_by_department(&self, department: &str) -> StoreResult<Vec<User>>;

    /// Users with the active flag set
    async fn find_active(&self) -> StoreResult<Vec<User>>;

    /// Active users in `department`, evaluated as a single query
    async fn find_active_by_department(&self, department: &str) -> StoreResult<Vec<User>>;

    /// Inserts a new user and returns it with its assigned ID
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateEmail`] if the email is taken.
    async fn insert(&self, user: NewUser) -> StoreResult<User>;

    /// Inserts or replaces the user with `user.id`
    async fn save(&self, user: User) -> StoreResult<User>;

    /// Deletes the user with this ID; returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> StoreResult<bool>;

    /// Whether a user with this ID exists
    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;
}

/// Persistence contract for categories
///
/// IDs of [`crate::models::category::UNASSIGNED_ID`] are replaced by the
/// next value of the store's counter on `insert` and `save`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories, ordered by ID
    async fn find_all(&self) -> StoreResult<Vec<Category>>;

    /// Category with this ID, if any
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Category>>;

    /// Stores a new category
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if a non-zero ID is already taken.
    async fn insert(&self, category: Category) -> StoreResult<Category>;

    /// Inserts or replaces the category with `category.id`
    async fn save(&self, category: Category) -> StoreResult<Category>;

    /// Deletes the category with this ID; returns whether one was removed
    async fn delete_by_id(&self, id: i32) -> StoreResult<bool>;

    /// Whether a category with this ID exists
    async fn exists_by_id(&self, id: i32) -> StoreResult<bool>;

    /// Categories with the active flag set
    async fn find_active(&self) -> StoreResult<Vec<Category>>;

    /// Categories whose name contains `term`, ignoring case
    async fn search_by_name(&self, term: &str) -> StoreResult<Vec<Category>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::DuplicateId(4);
        assert_eq!(err.to_string(), "Duplicate id: 4");

        let err = StoreError::DuplicateEmail("john@example.com".to_string());
        assert_eq!(err.to_string(), "Email already exists: john@example.com");
    }

    #[test]
    fn test_sqlx_error_converts() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
