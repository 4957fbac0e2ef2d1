// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::domains::auth::JwtService;
use server_core::domains::customers::{
    CustomerStore, MemoryCustomerStore, PostgresCustomerStore,
};
use server_core::domains::installers::{
    InstallerStore, MemoryInstallerStore, PostgresInstallerStore,
};
use server_core::kernel::{BaseEmailSender, LogEmailSender, ServerDeps, SmtpEmailSender};
use server_core::{server::build_app, Config, StoreBackend};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Stores = (Arc<dyn InstallerStore>, Arc<dyn CustomerStore>);

async fn connect_stores(config: &Config) -> Result<Stores> {
    match (config.store, config.database_url.as_deref()) {
        (StoreBackend::Postgres, Some(database_url)) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations complete");

            let installers: Arc<dyn InstallerStore> =
                Arc::new(PostgresInstallerStore::new(pool.clone()));
            let customers: Arc<dyn CustomerStore> = Arc::new(PostgresCustomerStore::new(pool));
            Ok((installers, customers))
        }
        (StoreBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL must be set when STORE=postgres")
        }
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            let installers: Arc<dyn InstallerStore> = Arc::new(MemoryInstallerStore::new());
            let customers: Arc<dyn CustomerStore> = Arc::new(MemoryCustomerStore::new());
            Ok((installers, customers))
        }
    }
}

fn email_sender(config: &Config) -> Result<Arc<dyn BaseEmailSender>> {
    match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "Email via SMTP");
            let sender = SmtpEmailSender::new(smtp, &config.from_address())
                .context("Failed to configure SMTP transport")?;
            Ok(Arc::new(sender))
        }
        None => {
            tracing::warn!("SMTP_HOST not set; notification emails are only logged");
            Ok(Arc::new(LogEmailSender))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting installer dispatch API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(store = ?config.store, "Configuration loaded");

    let (installers, customers) = connect_stores(&config).await?;
    let email = email_sender(&config)?;
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
    ));

    let (deps, _worker) = ServerDeps::start(
        installers,
        customers,
        email,
        jwt_service,
        config.job_queue_capacity,
    );

    // Build application
    let app = build_app(deps, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
