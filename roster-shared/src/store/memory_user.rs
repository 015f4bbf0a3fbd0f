/// In-memory user store
///
/// Used when no database is configured and throughout the tests. Mirrors the
/// PostgreSQL store's contract, including email uniqueness and ID order.
/// IDs never wrap: once `i64::MAX` is taken, inserts fail with
/// [`StoreError::IdSpaceExhausted`].

use crate::models::user::{NewUser, User};
use crate::store::{StoreError, StoreResult, UserStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Thread-safe in-memory user store
#[derive(Debug)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    /// Creates an empty store whose first assigned ID is 1
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users
            .read()
            .await
            .values()
            .filter(|user| predicate(user))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn email_taken(users: &BTreeMap<i64, User>, email: &str, except: Option<i64>) -> bool {
    users
        .values()
        .any(|user| user.email == email && Some(user.id) != except)
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_department(&self, department: &str) -> StoreResult<Vec<User>> {
        Ok(self.filtered(|user| user.department == department).await)
    }

    async fn find_active(&self) -> StoreResult<Vec<User>> {
        Ok(self.filtered(|user| user.active).await)
    }

    async fn find_active_by_department(&self, department: &str) -> StoreResult<Vec<User>> {
        Ok(self
            .filtered(|user| user.active && user.department == department)
            .await)
    }

    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, None) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        let mut id = self.next_id.load(Ordering::SeqCst);
        while users.contains_key(&id) {
            id = id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
        }
        self.next_id.store(id.saturating_add(1), Ordering::SeqCst);

        let user = user.into_user(id);
        users.insert(user.id, user.clone());

        debug!(user_id = user.id, department = %user.department, "Inserted user");
        Ok(user)
    }

    async fn save(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, Some(user.id)) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        self.next_id
            .fetch_max(user.id.saturating_add(1), Ordering::SeqCst);
        users.insert(user.id, user.clone());

        debug!(user_id = user.id, "Saved user");
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let removed = self.users.write().await.remove(&id).is_some();
        debug!(user_id = id, removed, "Deleted user");
        Ok(removed)
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.users.read().await.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str, department: &str, active: bool) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            department: department.to_string(),
            active,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_in_order() {
        let store = InMemoryUserStore::new();
        let a = store.insert(new_user("John Doe", "john@example.com", "Engineering", true)).await.unwrap();
        let b = store.insert(new_user("Jane Smith", "jane@example.com", "Marketing", true)).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("John Doe", "john@example.com", "Engineering", true)).await.unwrap();

        let err = store
            .insert(new_user("Johnny", "john@example.com", "Sales", true))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_save_allows_keeping_own_email() {
        let store = InMemoryUserStore::new();
        let mut john = store.insert(new_user("John Doe", "john@example.com", "Engineering", true)).await.unwrap();

        john.department = "Research".to_string();
        let saved = store.save(john.clone()).await.unwrap();
        assert_eq!(saved.department, "Research");
        assert_eq!(store.find_by_email("john@example.com").await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_save_at_max_id_exhausts_inserts() {
        let store = InMemoryUserStore::new();
        let pinned = new_user("Pinned User", "pinned@example.com", "Engineering", true).into_user(i64::MAX);
        store.save(pinned.clone()).await.unwrap();

        let err = store
            .insert(new_user("Next User", "next@example.com", "Sales", true))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::IdSpaceExhausted));
        assert_eq!(store.find_by_id(i64::MAX).await.unwrap(), Some(pinned));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_skips_ids_taken_by_save() {
        let store = InMemoryUserStore::new();
        store
            .save(new_user("Saved User", "saved@example.com", "Sales", true).into_user(1))
            .await
            .unwrap();

        let next = store
            .insert(new_user("John Doe", "john@example.com", "Engineering", true))
            .await
            .unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_predicate_queries() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("John Doe", "john@example.com", "Engineering", true)).await.unwrap();
        store.insert(new_user("Jane Smith", "jane@example.com", "Marketing", true)).await.unwrap();
        store.insert(new_user("Bob Johnson", "bob@example.com", "Engineering", false)).await.unwrap();

        assert_eq!(store.find_by_department("Engineering").await.unwrap().len(), 2);
        assert!(store.find_by_department("engineering").await.unwrap().is_empty());
        assert_eq!(store.find_active().await.unwrap().len(), 2);

        let active_eng = store.find_active_by_department("Engineering").await.unwrap();
        assert_eq!(active_eng.len(), 1);
        assert_eq!(active_eng[0].name, "John Doe");
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let store = InMemoryUserStore::new();
        let john = store.insert(new_user("John Doe", "john@example.com", "Engineering", true)).await.unwrap();

        assert!(store.exists_by_id(john.id).await.unwrap());
        assert!(store.delete_by_id(john.id).await.unwrap());
        assert!(!store.exists_by_id(john.id).await.unwrap());
        assert_eq!(store.find_by_id(john.id).await.unwrap(), None);
    }
}
