use chrono::{Datelike, Utc};
use dotenvy::dotenv;
use finance_buddy::{
    config::{database, defaults, settings::Settings},
    core::{household, report, user},
    errors::Result,
    query::QueryClient,
    session::Session,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Settings and admin defaults
    let settings = Settings::from_env().inspect_err(|e| error!("Invalid settings: {}", e))?;
    if settings.api_key.is_some() {
        info!("API key configured");
    } else {
        warn!("No API key configured, connecting anonymously");
    }
    let config = defaults::load_config_or_default(&settings.config_path)
        .inspect_err(|e| error!("Failed to load {}: {}", settings.config_path.display(), e))?;

    // 4. Backend
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Scope is decided once for the whole session
    let scope = household::resolve_scope(&db, settings.household_id.as_deref())
        .await
        .inspect(|scope| info!(%scope, "Resolved scope"))
        .inspect_err(|e| error!("Failed to resolve scope: {}", e))?;

    // 6. Make sure the configured user exists, then log in
    user::find_or_create(&db, &scope, &settings.user_email, &settings.user_name).await?;
    let client = QueryClient::new(config.cache.to_options());
    let session = Session::login(db, client, scope, &settings.user_email).await?;

    session
        .seed_defaults(&config)
        .await
        .inspect(|report| info!(?report, "Defaults seeded"))
        .inspect_err(|e| error!("Failed to seed defaults: {}", e))?;

    // 7. Current month at a glance
    let today = Utc::now().date_naive();
    let summary = session
        .summary(today.year(), today.month())
        .await
        .into_result()?;
    info!(
        "\n{}",
        report::format_monthly_summary(&summary, &config.income)
    );

    let reserves = session.reserves().await.into_result()?;
    let holdings = report::holdings_summary(
        reserves.iter().map(|r| (r.current_value, r.target_value)),
    );
    info!(
        count = holdings.count,
        total = holdings.total_value,
        "Reserves {}",
        report::format_progress_bar(holdings.progress_percent, None)
    );

    Ok(())
}
