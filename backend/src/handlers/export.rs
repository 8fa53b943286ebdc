//! Export handlers: CSV and calendar downloads of the filtered view
//!
//! Both downloads run the filter engine over the live record list with the
//! criteria the dashboard currently shows, so the exported file always
//! matches the table on screen.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use shared::export::{to_calendar, to_csv, CALENDAR_EXPORT_FILENAME, CSV_EXPORT_FILENAME};
use shared::insights::{filter_records, ExpiryWindow, FilterCriteria};
use shared::models::CertificationStatus;

use crate::error::{AppError, AppResult};
use crate::services::CertificationService;
use crate::AppState;

/// Filter selections forwarded from the dashboard view
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub window: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ExportQuery {
    fn into_criteria(self) -> AppResult<FilterCriteria> {
        let window = match self.window.as_deref() {
            None => ExpiryWindow::All,
            Some(raw) => raw.parse::<ExpiryWindow>().map_err(|message| {
                AppError::Validation {
                    field: "window".to_string(),
                    message,
                }
            })?,
        };

        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<CertificationStatus>().map_err(|message| {
                AppError::Validation {
                    field: "status".to_string(),
                    message,
                }
            })?),
        };

        Ok(FilterCriteria {
            window,
            category: self.category.filter(|category| !category.is_empty()),
            status,
            search: self.search,
        })
    }
}

/// Download the current view as a CSV file
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let criteria = query.into_criteria()?;
    let service = CertificationService::new(state.store.clone());
    let records = service.list_enriched(Utc::now().date_naive()).await?;
    let view = filter_records(&records, &criteria);

    match to_csv(&view)? {
        Some(document) => Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CSV_EXPORT_FILENAME),
                ),
            ],
            document,
        )
            .into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Download upcoming renewals from the current view as an iCalendar file
pub async fn export_calendar(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let criteria = query.into_criteria()?;
    let service = CertificationService::new(state.store.clone());
    let now = Utc::now();
    let records = service.list_enriched(now.date_naive()).await?;
    let view = filter_records(&records, &criteria);

    match to_calendar(&view, now) {
        Some(document) => Ok((
            [
                (
                    header::CONTENT_TYPE,
                    "text/calendar; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CALENDAR_EXPORT_FILENAME),
                ),
            ],
            document,
        )
            .into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
