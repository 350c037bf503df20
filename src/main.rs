//! PostCadence API server.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use postcadence::adapters::http::{app_router, AppState, HttpSettings};
use postcadence::adapters::postgres::MIGRATOR;
use postcadence::adapters::{
    LinkedInIdentityProvider, PostgresUserRepository, RedisSessionStore, StripeWebhookVerifier,
};
use postcadence::application::SubscriptionSyncHandler;
use postcadence::config::AppConfig;
use postcadence::ports::UserRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    tracing::info!(environment = ?config.server.environment, "Configuration loaded");

    // PostgreSQL
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    // Redis
    let redis = redis::Client::open(config.redis.url.as_str())?
        .get_multiplexed_tokio_connection()
        .await?;
    tracing::info!("Redis connection established");

    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let state = AppState {
        identity_provider: Arc::new(LinkedInIdentityProvider::from_config(&config.auth)?),
        sessions: Arc::new(RedisSessionStore::new(
            redis,
            config.redis.session_key_prefix.clone(),
            config.auth.session_ttl_secs,
        )),
        users: users.clone(),
        webhook_verifier: Arc::new(StripeWebhookVerifier::from_config(&config.payment)),
        billing_handler: Arc::new(SubscriptionSyncHandler::new(users)),
        settings: Arc::new(HttpSettings::from_config(&config.server, &config.auth)),
    };

    let app = app_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Human-readable logs in development, JSON in production. `RUST_LOG`
/// overrides the configured level.
fn init_tracing(config: &AppConfig) {
    let level = &config.server.log_level;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("postcadence={0},tower_http={0}", level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
