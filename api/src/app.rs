//! Application factory
//!
//! Builds the Actix-web application from already-constructed state; all
//! services arrive as explicit instances.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use mm_core::repositories::UserRepository;
use mm_shared::config::JwtConfig;
use mm_shared::errors::ErrorResponse;

use crate::middleware::cors::create_cors;
use crate::routes::verification::{resend, send_codes, status, verify_email, verify_sms};
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
    jwt_config: web::Data<JwtConfig>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<
                tracing_actix_web::StreamSpan<actix_web::body::BoxBody>,
            >,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .app_data(jwt_config)
        .wrap(TracingLogger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/verification")
                        .route("/send", web::post().to(send_codes::<U>))
                        .route("/verify-email", web::post().to(verify_email::<U>))
                        .route("/verify-sms", web::post().to(verify_sms::<U>))
                        .route("/resend", web::post().to(resend::<U>))
                        .route("/{user_id}/status", web::get().to(status::<U>)),
                )
                .service(
                    web::scope("/admin")
                        .route("/queue", web::get().to(queue_status::<U>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "muse-markets-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Delivery queue observability endpoint
async fn queue_status<U>(
    _user: crate::middleware::AuthenticatedUser,
    state: web::Data<AppState<U>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    HttpResponse::Ok().json(state.queue.status())
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("NOT_FOUND", "resource not found"))
}
