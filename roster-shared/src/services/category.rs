/// Category business logic
///
/// [`CategoryService`] mirrors the user service over a [`CategoryStore`].
/// Creation honors explicit IDs and lets the store number the rest; updates
/// keep the ID and creation time and refresh `updated_at`.

use crate::models::category::{Category, CategoryChanges};
use crate::store::{CategoryStore, StoreResult};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Service for category operations
pub struct CategoryService<S: CategoryStore + ?Sized> {
    store: Arc<S>,
}

impl<S: CategoryStore + ?Sized> Clone for CategoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CategoryStore + ?Sized> CategoryService<S> {
    /// Creates a service over `store`
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All categories in ID order
    pub async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.store.find_all().await
    }

    /// Category with this ID, or `None`
    pub async fn get_category(&self, id: i32) -> StoreResult<Option<Category>> {
        self.store.find_by_id(id).await
    }

    /// Stores a new category
    ///
    /// An ID of zero is replaced by the store's next ID. A non-zero ID is kept
    /// as given.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if a non-zero ID is already taken.
    pub async fn create_category(&self, category: Category) -> StoreResult<Category> {
        let created = self.store.insert(category).await?;
        info!(category_id = created.id, name = %created.name, "Created category");
        Ok(created)
    }

    /// Replaces name, description and active flag of category `id`
    ///
    /// Returns `None` without saving if the category does not exist.
    pub async fn update_category(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> StoreResult<Option<Category>> {
        let Some(mut existing) = self.store.find_by_id(id).await? else {
            debug!(category_id = id, "Update skipped, category not found");
            return Ok(None);
        };

        existing.apply(changes, Utc::now());
        let saved = self.store.save(existing).await?;

        info!(category_id = saved.id, "Updated category");
        Ok(Some(saved))
    }

    /// Deletes category `id`; returns `false` if there was no such category
    pub async fn delete_category(&self, id: i32) -> StoreResult<bool> {
        if !self.store.exists_by_id(id).await? {
            return Ok(false);
        }

        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            info!(category_id = id, "Deleted category");
        }
        Ok(deleted)
    }

    /// Categories whose name contains `term`, ignoring case
    pub async fn search_categories(&self, term: &str) -> StoreResult<Vec<Category>> {
        self.store.search_by_name(term).await
    }

    /// Categories with the active flag set
    pub async fn active_categories(&self) -> StoreResult<Vec<Category>> {
        self.store.find_active().await
    }
}
