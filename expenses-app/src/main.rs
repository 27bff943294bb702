//! # Expenses Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository and attachment store adapters
//! - Register payment method providers
//! - Create the payment service
//! - Start the HTTP server

mod config;
mod methods;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expenses_hex::{PaymentService, inbound::HttpServer};
use expenses_repo::{FsAttachmentStore, build_repo};
use expenses_types::PaymentMethodRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,expenses_app=debug,expenses_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting expenses server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Attachments land on the local filesystem
    let attachments = Arc::new(FsAttachmentStore::new(config.media_root));

    // Payment methods are whatever was registered at startup
    let mut registry = PaymentMethodRegistry::new();
    registry.register(Box::new(methods::OfflinePaymentMethods));

    // Create the payment service
    let service = PaymentService::new(repo, attachments, registry);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
