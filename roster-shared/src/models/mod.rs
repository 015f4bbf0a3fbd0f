/// Entity models for Roster
///
/// # Models
///
/// - `user`: users grouped by department, stored in PostgreSQL or memory
/// - `category`: catalogue categories, stored in memory
/// - `text`: case-insensitive matching shared by the filters
///
/// # Example
///
/// ```
/// use roster_shared::models::{category::Category, user::NewUser};
///
/// let user = NewUser {
///     name: "John Doe".to_string(),
///     email: "john@example.com".to_string(),
///     department: "Engineering".to_string(),
///     active: true,
/// };
/// let category = Category::new("Electronics", "Electronic devices", true);
/// # let _ = (user, category);
/// ```

pub mod category;
pub mod text;
pub mod user;
