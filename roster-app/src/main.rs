//! # Roster
//!
//! Boots the user and category services, optionally seeds demo data and
//! prints a summary of what the stores hold.
//!
//! ## Usage
//!
//! ```bash
//! SEED_DEMO_DATA=true cargo run -p roster-app
//! ```

use roster_app::app::App;
use roster_app::config::{Config, LogFormat};
use roster_app::seed::seed_demo_data;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.user_backend(),
        "Roster starting..."
    );

    let app = match App::bootstrap(config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "Failed to start");
            return Err(e.into());
        }
    };

    if app.config.startup.seed_demo_data {
        seed_demo_data(&app).await?;
    }

    let users = app.users.list_users().await?;
    let active = app.users.active_users().await?;
    let categories = app.categories.active_categories().await?;
    let stats = app.users.department_statistics().await?;

    tracing::info!(
        users = users.len(),
        active_users = active.len(),
        active_categories = categories.len(),
        "Stores ready"
    );
    for (department, count) in &stats {
        tracing::info!(department = %department, active = count, "Department");
    }

    app.shutdown().await;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roster=debug,roster_app=debug,roster_shared=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
