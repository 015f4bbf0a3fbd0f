/// Common test utilities for integration tests
///
/// Builds an application over the in-memory stores, optionally seeded with
/// the demo data.

use roster_app::app::App;
use roster_app::config::{Config, StartupConfig};
use roster_app::seed::{seed_demo_data, SeedReport};

/// Test context containing a running application
pub struct TestContext {
    pub app: App,
    pub seed: Option<SeedReport>,
}

impl TestContext {
    /// Creates an empty in-memory application
    pub fn new() -> Self {
        Self {
            app: App::in_memory(test_config(false)),
            seed: None,
        }
    }

    /// Creates an in-memory application loaded with the demo data
    pub async fn seeded() -> anyhow::Result<Self> {
        let app = App::bootstrap(test_config(true)).await?;
        let seed = seed_demo_data(&app).await?;

        Ok(Self {
            app,
            seed: Some(seed),
        })
    }
}

fn test_config(seed_demo_data: bool) -> Config {
    Config {
        startup: StartupConfig {
            run_migrations: false,
            seed_demo_data,
        },
        ..Config::default()
    }
}
