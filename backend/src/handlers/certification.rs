//! HTTP handlers for certification records

use axum::{extract::State, http::StatusCode, Json};

use shared::models::{Certification, NewCertification};

use crate::error::AppResult;
use crate::services::CertificationService;
use crate::AppState;

/// List all certifications, expiry ascending with undated records last
pub async fn list_certifications(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Certification>>> {
    let service = CertificationService::new(state.store.clone());
    let certifications = service.list_certifications().await?;
    Ok(Json(certifications))
}

/// Create a new certification
pub async fn create_certification(
    State(state): State<AppState>,
    Json(input): Json<NewCertification>,
) -> AppResult<(StatusCode, Json<Certification>)> {
    let service = CertificationService::new(state.store.clone());
    let certification = service.create_certification(input).await?;
    Ok((StatusCode::CREATED, Json(certification)))
}
