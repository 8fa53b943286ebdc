//! Route definitions for the CertTrack API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Certification records and exports
        .nest("/certifications", certification_routes())
        // Admin aggregation view
        .nest("/insights", insight_routes())
}

/// Certification record routes
fn certification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_certifications).post(handlers::create_certification),
        )
        // Exports of the filtered dashboard view
        .route("/export/csv", get(handlers::export_csv))
        .route("/export/calendar", get(handlers::export_calendar))
}

/// Admin aggregation routes
fn insight_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/quality", get(handlers::get_quality))
        .route("/providers", get(handlers::get_provider_breakdown))
        .route("/categories", get(handlers::get_category_breakdown))
        .route("/anomalies", get(handlers::get_anomalies))
        .route("/recent", get(handlers::get_recent))
}
