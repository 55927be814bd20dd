//! AI Agriculture Assistant - Backend Server

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agri_assistant::config::{Config, StoreDriver};
use agri_assistant::external::{OpenAiClient, WeatherClient};
use agri_assistant::store::{memory::MemoryDocumentStore, postgres::PgDocumentStore, DocumentStore};
use agri_assistant::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "agri_assistant=debug,agri_server=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting AI Agriculture Assistant server");
    tracing::info!("Environment: {}", config.environment);

    let store = connect_store(&config).await?;
    let weather = Arc::new(WeatherClient::new(&config.weather)?);
    let model = Arc::new(OpenAiClient::new(&config.llm)?);

    // Create application state
    let state = AppState::new(store, weather, model);

    // Build application
    let app = create_app(state);

    // Start server
    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("invalid server.host {:?}", config.server.host))?;
    let addr = SocketAddr::new(ip, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the configured document store
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.database.driver {
        StoreDriver::Memory => {
            tracing::warn!("Using in-memory document store; records are lost on restart");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        StoreDriver::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("database.url must be set when database.driver is postgres")?;

            tracing::info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(url)
                .await?;
            tracing::info!("Database connection established");

            // Run migrations in development
            if config.is_development() {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations").run(&db_pool).await?;
                tracing::info!("Migrations completed");
            }

            Ok(Arc::new(PgDocumentStore::new(db_pool)))
        }
    }
}
