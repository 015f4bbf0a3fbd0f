/// Category model
///
/// Categories group products in the demo catalogue. They are kept in an
/// in-memory store keyed by an auto-incrementing integer ID.
///
/// An ID of [`UNASSIGNED_ID`] (zero) means "not yet stored": the store picks
/// the next sequential ID when it sees it.
///
/// Equality and hashing are defined by the ID alone.
///
/// # Example
///
/// ```
/// use roster_shared::models::category::{Category, UNASSIGNED_ID};
///
/// let category = Category::new("Books", "Reading materials", true);
/// assert_eq!(category.id, UNASSIGNED_ID);
/// assert_eq!(category.created_at, category.updated_at);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Sentinel ID asking the store to assign the next sequential ID
pub const UNASSIGNED_ID: i32 = 0;

/// Category model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category ID (0 until stored)
    pub id: i32,

    /// Category name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Whether the category is active
    pub active: bool,

    /// When the category was created (never changes afterwards)
    pub created_at: DateTime<Utc>,

    /// When the category was last updated
    pub updated_at: DateTime<Utc>,
}

/// Replacement values for an existing category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChanges {
    /// New name
    pub name: String,

    /// New description
    pub description: String,

    /// New active flag
    pub active: bool,
}

impl Category {
    /// Creates an unstored category with both timestamps set to now
    pub fn new(name: impl Into<String>, description: impl Into<String>, active: bool) -> Self {
        let now = Utc::now();
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            description: description.into(),
            active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets an explicit ID, keeping everything else
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Returns true if the category has not been given an ID yet
    pub fn is_unassigned(&self) -> bool {
        self.id == UNASSIGNED_ID
    }

    /// Replaces name, description and active flag and refreshes `updated_at`
    ///
    /// The ID and `created_at` are left untouched. `updated_at` never moves
    /// backwards and never precedes `created_at`, even if the wall clock does.
    pub fn apply(&mut self, changes: CategoryChanges, now: DateTime<Utc>) {
        self.name = changes.name;
        self.description = changes.description;
        self.active = changes.active;
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;

    #[test]
    fn test_new_category_is_unassigned() {
        let category = Category::new("Electronics", "Electronic devices", true);
        assert!(category.is_unassigned());
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_equality_uses_id_only() {
        let a = Category::new("Electronics", "Electronic devices", true).with_id(1);
        let b = Category::new("Books", "Reading materials", false).with_id(1);
        let c = Category::new("Electronics", "Electronic devices", true).with_id(2);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Category> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_apply_keeps_identity_and_created_at() {
        let mut category = Category::new("Electronics", "Electronic devices", true).with_id(3);
        let created_at = category.created_at;
        let later = created_at + Duration::seconds(5);

        category.apply(
            CategoryChanges {
                name: "Electronics Updated".to_string(),
                description: "Updated description".to_string(),
                active: false,
            },
            later,
        );

        assert_eq!(category.id, 3);
        assert_eq!(category.created_at, created_at);
        assert_eq!(category.updated_at, later);
        assert_eq!(category.name, "Electronics Updated");
        assert!(!category.active);
    }

    #[test]
    fn test_apply_never_moves_updated_at_backwards() {
        let mut category = Category::new("Books", "Reading materials", true).with_id(1);
        let before = category.updated_at;

        category.apply(
            CategoryChanges {
                name: "Books".to_string(),
                description: "Reading materials".to_string(),
                active: true,
            },
            before - Duration::hours(1),
        );

        assert_eq!(category.updated_at, before);
    }
}
