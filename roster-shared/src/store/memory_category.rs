/// In-memory category store
///
/// Categories live in a `BTreeMap` behind an async `RwLock`, so the store can
/// be shared across tasks behind an `Arc` without any outer locking. IDs come
/// from an atomic counter that starts at 1 and only ever moves forward.
///
/// # ID Assignment
///
/// ```text
/// insert(id = 0)  -> id = first free id >= counter, counter = id + 1
/// insert(id = n)  -> id = n, counter = max(counter, n + 1)
/// ```
///
/// Advancing the counter past explicit IDs keeps later auto-assigned IDs
/// from landing on an occupied slot. The counter saturates at `i32::MAX`
/// instead of wrapping; once that slot is taken, auto-assignment fails with
/// [`StoreError::IdSpaceExhausted`].
///
/// # Example
///
/// ```
/// use roster_shared::models::category::Category;
/// use roster_shared::store::{CategoryStore, InMemoryCategoryStore};
///
/// # async fn example() -> Result<(), roster_shared::store::StoreError> {
/// let store = InMemoryCategoryStore::new();
/// let books = store.insert(Category::new("Books", "Reading materials", true)).await?;
/// assert_eq!(books.id, 1);
/// # Ok(())
/// # }
/// ```

use crate::models::category::Category;
use crate::models::text;
use crate::store::{CategoryStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// First ID handed out by a fresh store
const FIRST_ID: i32 = 1;

/// Thread-safe in-memory category store
#[derive(Debug)]
pub struct InMemoryCategoryStore {
    categories: RwLock<BTreeMap<i32, Category>>,
    next_id: AtomicI32,
}

impl InMemoryCategoryStore {
    /// Creates an empty store whose first assigned ID is 1
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(FIRST_ID),
        }
    }

    /// Number of stored categories
    pub async fn len(&self) -> usize {
        self.categories.read().await.len()
    }

    /// Whether the store holds no categories
    pub async fn is_empty(&self) -> bool {
        self.categories.read().await.is_empty()
    }

    /// Gives `category` its final ID
    ///
    /// Must be called with the write lock held so that the counter and the
    /// map move together.
    fn assign_id(
        &self,
        categories: &BTreeMap<i32, Category>,
        category: &mut Category,
    ) -> StoreResult<()> {
        if !category.is_unassigned() {
            self.next_id
                .fetch_max(category.id.saturating_add(1), Ordering::SeqCst);
            return Ok(());
        }

        let mut candidate = self.next_id.load(Ordering::SeqCst);
        while categories.contains_key(&candidate) {
            candidate = candidate
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted)?;
        }

        category.id = candidate;
        self.next_id
            .store(candidate.saturating_add(1), Ordering::SeqCst);
        Ok(())
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Category>
    where
        F: Fn(&Category) -> bool,
    {
        self.categories
            .read()
            .await
            .values()
            .filter(|category| predicate(category))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryCategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Category>> {
        Ok(self.categories.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn insert(&self, mut category: Category) -> StoreResult<Category> {
        let mut categories = self.categories.write().await;

        if !category.is_unassigned() && categories.contains_key(&category.id) {
            return Err(StoreError::DuplicateId(category.id.into()));
        }

        self.assign_id(&categories, &mut category)?;
        categories.insert(category.id, category.clone());

        debug!(category_id = category.id, name = %category.name, "Inserted category");
        Ok(category)
    }

    async fn save(&self, mut category: Category) -> StoreResult<Category> {
        let mut categories = self.categories.write().await;

        self.assign_id(&categories, &mut category)?;
        categories.insert(category.id, category.clone());

        debug!(category_id = category.id, "Saved category");
        Ok(category)
    }

    async fn delete_by_id(&self, id: i32) -> StoreResult<bool> {
        let removed = self.categories.write().await.remove(&id).is_some();
        debug!(category_id = id, removed, "Deleted category");
        Ok(removed)
    }

    async fn exists_by_id(&self, id: i32) -> StoreResult<bool> {
        Ok(self.categories.read().await.contains_key(&id))
    }

    async fn find_active(&self) -> StoreResult<Vec<Category>> {
        Ok(self.filtered(|category| category.active).await)
    }

    async fn search_by_name(&self, term: &str) -> StoreResult<Vec<Category>> {
        let needle = text::normalize(term);
        Ok(self
            .filtered(|category| text::contains_ignore_case(&category.name, &needle))
            .await)
    }
}
