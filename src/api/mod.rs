//! API routes for agenda-server

pub mod admin;
pub mod booking;
pub mod health;

use axum::routing::{get, post, put};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::staff_auth::staff_auth_middleware;
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

pub(crate) fn internal(e: impl std::fmt::Display) -> AppError {
    tracing::error!("Query error: {e}");
    AppError::new(ErrorCode::InternalError)
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Customer-facing booking surface (no auth)
    let public = Router::new()
        .route("/api/services", get(booking::list_services))
        .route(
            "/api/services/{id}/professionals",
            get(booking::list_professionals),
        )
        .route(
            "/api/professionals/{id}/availability",
            get(booking::weekly_availability),
        )
        .route(
            "/api/professionals/{id}/slots",
            get(booking::available_slots),
        )
        .route("/api/appointments", post(booking::create_appointment))
        .route(
            "/api/appointments/{id}/confirm-payment",
            post(booking::confirm_payment),
        );

    // Operator surface (JWT authenticated)
    let operator = Router::new()
        .route("/api/admin/appointments", get(admin::list_appointments))
        .route(
            "/api/admin/appointments/{id}/status",
            post(admin::update_appointment_status),
        )
        .route(
            "/api/admin/services",
            get(admin::list_services).post(admin::create_service),
        )
        .route(
            "/api/admin/services/{id}",
            put(admin::update_service).delete(admin::delete_service),
        )
        .route(
            "/api/admin/services/{id}/professionals",
            get(admin::service_roster).put(admin::set_service_roster),
        )
        .route(
            "/api/admin/professionals",
            get(admin::list_professionals).post(admin::create_professional),
        )
        .route(
            "/api/admin/professionals/{id}",
            put(admin::update_professional).delete(admin::delete_professional),
        )
        .route(
            "/api/admin/professionals/{id}/availability",
            get(admin::get_availability).put(admin::put_availability),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            staff_auth_middleware,
        ));

    let login = Router::new().route("/api/admin/login", post(admin::login));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(login)
        .merge(operator)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
