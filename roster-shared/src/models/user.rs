/// User model
///
/// This module provides the User entity and the input shapes used to create
/// and replace users. Persistence lives behind the `UserStore` trait in
/// `crate::store`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     department VARCHAR(255) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE
/// );
/// ```
///
/// # Example
///
/// ```
/// use roster_shared::models::user::{NewUser, User};
///
/// let new_user = NewUser {
///     name: "John Doe".to_string(),
///     email: "john@example.com".to_string(),
///     department: "Engineering".to_string(),
///     active: false,
/// };
///
/// let user = new_user.into_user(1);
/// assert_eq!(user.id, 1);
/// assert_eq!(user.department, "Engineering");
/// ```

use crate::models::text::contains_ignore_case;
use serde::{Deserialize, Serialize};

/// User model representing a member of a department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the store on insert
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address
    ///
    /// Must be unique across all users
    pub email: String,

    /// Free-text department label (matched exactly, case-sensitive)
    pub department: String,

    /// Whether the user is active
    #[sqlx(rename = "is_active")]
    pub active: bool,
}

/// Input for creating a new user
///
/// The `active` flag is carried for completeness but the user service
/// always forces it to `true` on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Department label
    pub department: String,

    /// Requested active flag
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Replacement values for an existing user
///
/// Updates are a full replace: every field overwrites the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChanges {
    /// New display name
    pub name: String,

    /// New email address
    pub email: String,

    /// New department label
    pub department: String,

    /// New active flag
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewUser {
    /// Builds the stored entity once the store has assigned an ID
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
            active: self.active,
        }
    }
}

impl User {
    /// Overwrites every mutable field with `changes`, keeping the ID
    pub fn apply(&mut self, changes: UserChanges) {
        self.name = changes.name;
        self.email = changes.email;
        self.department = changes.department;
        self.active = changes.active;
    }

    /// Returns true if `needle` (already lowercased) occurs in the name,
    /// email or department, ignoring case
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.name, &self.email, &self.department]
            .iter()
            .any(|field| contains_ignore_case(field, needle))
    }
}
