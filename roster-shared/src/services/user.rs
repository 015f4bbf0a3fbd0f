/// User business logic
///
/// [`UserService`] sits on top of a [`UserStore`] and adds the policy the
/// store does not know about: creation always activates the user, updates are
/// full replacements of an existing record, and search/statistics are
/// computed here.
///
/// Absence is never an error. Single-user operations return `Option`
/// (or `bool` for delete); list operations return an empty `Vec` when
/// nothing matches.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use roster_shared::models::user::NewUser;
/// use roster_shared::services::UserService;
/// use roster_shared::store::InMemoryUserStore;
///
/// # async fn example() -> Result<(), roster_shared::store::StoreError> {
/// let users = UserService::new(Arc::new(InMemoryUserStore::new()));
///
/// let john = users
///     .create_user(NewUser {
///         name: "John Doe".to_string(),
///         email: "john@example.com".to_string(),
///         department: "Engineering".to_string(),
///         active: false,
///     })
///     .await?;
/// assert!(john.active);
///
/// let stats = users.department_statistics().await?;
/// assert_eq!(stats.get("Engineering"), Some(&1));
/// # Ok(())
/// # }
/// ```

use crate::models::text;
use crate::models::user::{NewUser, User, UserChanges};
use crate::services::stats;
use crate::store::{StoreResult, UserStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Service for user operations
pub struct UserService<S: UserStore + ?Sized> {
    store: Arc<S>,
}

impl<S: UserStore + ?Sized> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: UserStore + ?Sized> UserService<S> {
    /// Creates a service over `store`
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All users in store order
    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.store.find_all().await
    }

    /// User with this ID, or `None`
    pub async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        self.store.find_by_id(id).await
    }

    /// User with this exact email address, or `None`
    pub async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.store.find_by_email(email).await
    }

    /// Creates a user
    ///
    /// The active flag is forced to `true` whatever the caller supplied.
    pub async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let user = self
            .store
            .insert(NewUser {
                active: true,
                ..new_user
            })
            .await?;

        info!(user_id = user.id, department = %user.department, "Created user");
        Ok(user)
    }

    /// Replaces name, email, department and active flag of user `id`
    ///
    /// Returns `None` without touching the store's write path if the user
    /// does not exist. This is a read-modify-write with no locking: two
    /// concurrent updates of the same user resolve as last-writer-wins.
    pub async fn update_user(&self, id: i64, changes: UserChanges) -> StoreResult<Option<User>> {
        let Some(mut existing) = self.store.find_by_id(id).await? else {
            debug!(user_id = id, "Update skipped, user not found");
            return Ok(None);
        };

        existing.apply(changes);
        let saved = self.store.save(existing).await?;

        info!(user_id = saved.id, "Updated user");
        Ok(Some(saved))
    }

    /// Deletes user `id`; returns `false` if there was no such user
    pub async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        if !self.store.exists_by_id(id).await? {
            debug!(user_id = id, "Delete skipped, user not found");
            return Ok(false);
        }

        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }

    /// Users whose department equals `department` exactly
    pub async fn users_by_department(&self, department: &str) -> StoreResult<Vec<User>> {
        self.store.find_by_department(department).await
    }

    /// Users with the active flag set
    pub async fn active_users(&self) -> StoreResult<Vec<User>> {
        self.store.find_active().await
    }

    /// Active users in `department`, fetched with a single store query
    pub async fn active_users_by_department(&self, department: &str) -> StoreResult<Vec<User>> {
        self.store.find_active_by_department(department).await
    }

    /// Searches users by free text
    ///
    /// A user matches when `query` occurs, ignoring case, in its name, email
    /// or department. When `department` is given the user must also belong
    /// to exactly that department. An empty query matches every user.
    pub async fn search_users(
        &self,
        query: &str,
        department: Option<&str>,
    ) -> StoreResult<Vec<User>> {
        let candidates = match department {
            Some(department) => self.store.find_by_department(department).await?,
            None => self.store.find_all().await?,
        };

        let needle = text::normalize(query);
        let matches: Vec<User> = candidates
            .into_iter()
            .filter(|user| user.matches_lowercase(&needle))
            .collect();

        debug!(query, department = ?department, matches = matches.len(), "Searched users");
        Ok(matches)
    }

    /// Number of active users per department, keyed alphabetically
    pub async fn department_statistics(&self) -> StoreResult<BTreeMap<String, u64>> {
        let active = self.store.find_active().await?;
        Ok(stats::count_by(active, |user| user.department.clone()))
    }

    /// Names of all users in store order
    pub async fn user_names(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .store
            .find_all()
            .await?
            .into_iter()
            .map(|user| user.name)
            .collect())
    }
}
