use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mm_core::repositories::InMemoryUserRepository;
use mm_core::services::clock::SystemClock;
use mm_core::services::delivery::{DeliveryQueue, EmailSender};
use mm_core::services::verification::{VerificationService, VerificationServiceConfig};
use mm_infra::email::create_email_provider;
use mm_infra::sms::create_sms_backend;
use mm_shared::config::AppConfig;

use mm_api::routes::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env when present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting Muse Markets API server");

    let config = AppConfig::from_env();
    if config.auth.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the default development secret");
    }

    // Outbound email path: one provider serves both the queued and the
    // direct send modes
    let email_provider = create_email_provider(&config.email);
    let queue = Arc::new(DeliveryQueue::new(
        email_provider.clone(),
        config.delivery.clone(),
    ));
    let email_sender = Arc::new(EmailSender::new(
        email_provider,
        queue.clone(),
        config.email.delivery_mode,
    ));

    // Single delivery worker; the queue is process-local and safe only
    // under this one-runner assumption
    let queue_runner = queue.clone();
    tokio::spawn(async move { queue_runner.run().await });

    let sms_backend = create_sms_backend(&config.sms);
    info!(backend = sms_backend.backend_name(), "sms verification backend selected");

    // The platform's durable user store is an external collaborator;
    // the in-memory repository backs local development
    let users = Arc::new(InMemoryUserRepository::new());

    let verification = Arc::new(VerificationService::new(
        users,
        sms_backend,
        email_sender,
        Arc::new(SystemClock),
        VerificationServiceConfig::from_shared(&config.verification, &config.sms),
    ));

    let app_state = web::Data::new(AppState {
        verification,
        queue,
    });
    let jwt_config = web::Data::new(config.auth.clone());

    let bind_address = config.server.bind_address();
    info!("server will bind to {bind_address}");

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || {
        mm_api::create_app(app_state.clone(), jwt_config.clone())
    });
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await
        .context("server terminated with an error")
}
