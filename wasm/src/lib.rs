//! WebAssembly module for the CertTrack dashboard
//!
//! Provides client-side computation for:
//! - Expiry status derivation
//! - View filtering and portfolio stats
//! - Data-quality and anomaly panels
//! - CSV and calendar exports
//!
//! Records come in as loose JSON in either field-naming convention and are
//! normalized before derivation, so the browser-local store and the API can
//! feed the same entry points.

use chrono::{Local, Utc};
use wasm_bindgen::prelude::*;

use shared::expiry::enrich_all;
use shared::export::{to_calendar, to_csv};
use shared::insights::{
    assess_quality, count_by_category, count_by_provider, filter_records, find_anomalies,
    next_renewal, recent_additions, summarize, FilterCriteria,
};
use shared::models::EnrichedCertification;
use shared::normalize::normalize_all;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Normalize raw records and attach derived expiry fields
#[wasm_bindgen]
pub fn enrich_certifications(records_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&records)
}

/// Narrow records to the subset matching the dashboard filter state
#[wasm_bindgen]
pub fn filter_certifications(records_json: &str, criteria_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    let criteria: FilterCriteria = serde_json::from_str(criteria_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid criteria JSON: {}", e)))?;
    to_json(&filter_records(&records, &criteria))
}

/// Portfolio counts for the stats row
#[wasm_bindgen]
pub fn portfolio_summary(records_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&summarize(&records))
}

/// Field completeness report for the data-quality panel
#[wasm_bindgen]
pub fn data_quality(records_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&assess_quality(&records))
}

/// Record counts grouped by issuing provider, descending
#[wasm_bindgen]
pub fn provider_breakdown(records_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&count_by_provider(&records))
}

/// Record counts grouped by category, descending
#[wasm_bindgen]
pub fn category_breakdown(records_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&count_by_category(&records))
}

/// Records flagged for data-quality issues, capped at `limit`
#[wasm_bindgen]
pub fn detect_anomalies(records_json: &str, limit: usize) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&find_anomalies(&records, limit))
}

/// Most recently dated records, newest first, capped at `limit`
#[wasm_bindgen]
pub fn recent_certifications(records_json: &str, limit: usize) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&recent_additions(&records, limit))
}

/// The upcoming renewal closest to today, or JSON `null`
#[wasm_bindgen]
pub fn upcoming_renewal(records_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&next_renewal(&records))
}

/// Encode the current view as a CSV document; `None` when the view is empty
#[wasm_bindgen]
pub fn export_certifications_csv(records_json: &str) -> Result<Option<String>, JsValue> {
    let records = parse_records(records_json)?;
    to_csv(&records).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode upcoming renewals from the current view as an iCalendar document;
/// `None` when no record is eligible
#[wasm_bindgen]
pub fn export_renewal_calendar(records_json: &str) -> Result<Option<String>, JsValue> {
    let records = parse_records(records_json)?;
    Ok(to_calendar(&records, Utc::now()))
}

fn parse_records(records_json: &str) -> Result<Vec<EnrichedCertification>, JsValue> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid records JSON: {}", e)))?;
    // Browser-local midnight is the reference date, matching what the
    // dashboard table shows the user.
    let today = Local::now().date_naive();
    Ok(enrich_all(normalize_all(&raw), today))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
