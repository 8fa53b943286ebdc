//! HTTP handlers for the admin aggregation view
//!
//! Every endpoint derives fresh from the stored records, so the same data
//! yields different statuses and counts on different days.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use shared::insights::{
    assess_quality, count_by_category, count_by_provider, find_anomalies, recent_additions,
    summarize, Anomaly, DataQualityReport, GroupCount, PortfolioSummary,
};
use shared::models::EnrichedCertification;

use crate::error::AppResult;
use crate::services::CertificationService;
use crate::AppState;

/// Default cap for the anomaly and recent-additions panels
const DEFAULT_PANEL_LIMIT: usize = 6;

/// Query parameters for the capped admin panels
#[derive(Debug, Deserialize)]
pub struct PanelQuery {
    pub limit: Option<usize>,
}

/// Portfolio counts for the admin stats row
pub async fn get_summary(State(state): State<AppState>) -> AppResult<Json<PortfolioSummary>> {
    let records = load_enriched(&state).await?;
    Ok(Json(summarize(&records)))
}

/// Field completeness report for the data-quality panel
pub async fn get_quality(State(state): State<AppState>) -> AppResult<Json<DataQualityReport>> {
    let records = load_enriched(&state).await?;
    Ok(Json(assess_quality(&records)))
}

/// Record counts grouped by issuing provider, descending
pub async fn get_provider_breakdown(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<GroupCount>>> {
    let records = load_enriched(&state).await?;
    Ok(Json(count_by_provider(&records)))
}

/// Record counts grouped by category, descending
pub async fn get_category_breakdown(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<GroupCount>>> {
    let records = load_enriched(&state).await?;
    Ok(Json(count_by_category(&records)))
}

/// Records flagged for data-quality issues, in listing order
pub async fn get_anomalies(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> AppResult<Json<Vec<Anomaly>>> {
    let records = load_enriched(&state).await?;
    let limit = query.limit.unwrap_or(DEFAULT_PANEL_LIMIT);
    Ok(Json(find_anomalies(&records, limit)))
}

/// Most recently dated records, newest first
pub async fn get_recent(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> AppResult<Json<Vec<EnrichedCertification>>> {
    let records = load_enriched(&state).await?;
    let limit = query.limit.unwrap_or(DEFAULT_PANEL_LIMIT);
    Ok(Json(recent_additions(&records, limit)))
}

async fn load_enriched(state: &AppState) -> AppResult<Vec<EnrichedCertification>> {
    let service = CertificationService::new(state.store.clone());
    service.list_enriched(Utc::now().date_naive()).await
}
