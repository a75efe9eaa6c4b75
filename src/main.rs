use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tasking::api::router;
use tasking::clock::{Clock, SystemClock};
use tasking::config::AppConfig;
use tasking::db;
use tasking::services::StreakScheduler;
use tasking::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tasking=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    let pool = db::connect(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let scheduler = StreakScheduler::new(
        pool.clone(),
        clock.clone(),
        config.streak_sweep_interval_secs,
    );
    tokio::spawn(scheduler.start());

    let state = AppState { db: pool, clock };
    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
