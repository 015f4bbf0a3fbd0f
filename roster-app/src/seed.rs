/// Demo data for local development
///
/// Seeds three users and three categories through the services, so the same
/// rules apply as for any other caller: new users start active and Bob is
/// deactivated with an ordinary update afterwards.
///
/// Seeding is safe to repeat against a persistent user store. Users whose
/// email already exists are skipped.

use crate::app::App;
use crate::error::AppResult;
use roster_shared::models::category::Category;
use roster_shared::models::user::{NewUser, UserChanges};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// (name, email, department, active)
const DEMO_USERS: [(&str, &str, &str, bool); 3] = [
    ("John Doe", "john@example.com", "Engineering", true),
    ("Jane Smith", "jane@example.com", "Marketing", true),
    ("Bob Johnson", "bob@example.com", "Engineering", false),
];

/// (name, description, active)
const DEMO_CATEGORIES: [(&str, &str, bool); 3] = [
    ("Electronics", "Electronic devices and gadgets", true),
    ("Books", "Books and reading materials", true),
    ("Inactive Category", "This category is inactive", false),
];

/// What a seeding run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Users created by this run
    pub users_created: usize,

    /// Users skipped because their email already existed
    pub users_skipped: usize,

    /// Categories created by this run
    pub categories_created: usize,

    /// Active users per department after seeding
    pub department_statistics: BTreeMap<String, u64>,
}

/// Loads the demo users and categories into `app`
///
/// # Errors
///
/// Returns an error if any store operation fails
pub async fn seed_demo_data(app: &App) -> AppResult<SeedReport> {
    let mut users_created = 0;
    let mut users_skipped = 0;

    for (name, email, department, active) in DEMO_USERS {
        if app.users.get_user_by_email(email).await?.is_some() {
            debug!(email, "Demo user already present");
            users_skipped += 1;
            continue;
        }

        let user = app
            .users
            .create_user(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                department: department.to_string(),
                active: true,
            })
            .await?;

        if !active {
            app.users
                .update_user(
                    user.id,
                    UserChanges {
                        name: user.name,
                        email: user.email,
                        department: user.department,
                        active: false,
                    },
                )
                .await?;
        }

        users_created += 1;
    }

    let mut categories_created = 0;
    for (name, description, active) in DEMO_CATEGORIES {
        app.categories
            .create_category(Category::new(name, description, active))
            .await?;
        categories_created += 1;
    }

    let department_statistics = app.users.department_statistics().await?;

    info!(
        users_created,
        users_skipped,
        categories_created,
        stats = ?department_statistics,
        "Demo data seeded"
    );

    Ok(SeedReport {
        users_created,
        users_skipped,
        categories_created,
        department_statistics,
    })
}
