//! Filtering and aggregation over enriched certification records
//!
//! Powers the dashboard filter bar and the admin overview panels. Every
//! operation here is a pure computation over a record list the caller owns;
//! nothing is cached between calls.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{CertificationStatus, EnrichedCertification};

/// Number of per-record fields feeding the completeness score
pub const TRACKED_FIELDS: usize = 6;

/// Bucket label for blank provider/category values
pub const UNSPECIFIED_LABEL: &str = "Unspecified";

/// Upper bound of the expiry-window filter, in days from the reference date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryWindow {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "30")]
    Days30,
    #[serde(rename = "60")]
    Days60,
    #[serde(rename = "90")]
    Days90,
}

impl ExpiryWindow {
    /// `None` means the window is unrestricted
    pub fn max_days(self) -> Option<i64> {
        match self {
            ExpiryWindow::All => None,
            ExpiryWindow::Days30 => Some(30),
            ExpiryWindow::Days60 => Some(60),
            ExpiryWindow::Days90 => Some(90),
        }
    }
}

impl FromStr for ExpiryWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(ExpiryWindow::All),
            "30" => Ok(ExpiryWindow::Days30),
            "60" => Ok(ExpiryWindow::Days60),
            "90" => Ok(ExpiryWindow::Days90),
            other => Err(format!("Invalid expiry window: {}", other)),
        }
    }
}

/// View-local filter state. Unset selectors match every record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub window: ExpiryWindow,
    pub category: Option<String>,
    pub status: Option<CertificationStatus>,
    pub search: Option<String>,
}

impl FilterCriteria {
    /// True when every selector is unset, i.e. the criteria match all records
    pub fn is_unrestricted(&self) -> bool {
        self.window == ExpiryWindow::All
            && self.category.is_none()
            && self.status.is_none()
            && !self.has_search()
    }

    fn has_search(&self) -> bool {
        self.search
            .as_deref()
            .is_some_and(|query| !query.trim().is_empty())
    }
}

/// Does a single record pass the filter conjunction?
pub fn matches(cert: &EnrichedCertification, criteria: &FilterCriteria) -> bool {
    // Expiry window only restricts records with a usable expiry date.
    if let (Some(max), Some(days)) = (criteria.window.max_days(), cert.days_left) {
        if days < 0 || days > max {
            return false;
        }
    }

    if let Some(category) = criteria.category.as_deref() {
        let same = cert
            .record
            .category
            .as_deref()
            .is_some_and(|have| have.to_lowercase() == category.to_lowercase());
        if !same {
            return false;
        }
    }

    if let Some(status) = criteria.status {
        if cert.status != status {
            return false;
        }
    }

    if criteria.has_search() {
        let query = criteria
            .search
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let record = &cert.record;
        let haystack = format!(
            "{} {} {}",
            record.name,
            record.provider.as_deref().unwrap_or_default(),
            record.cert_id.as_deref().unwrap_or_default()
        )
        .to_lowercase();
        if !haystack.contains(&query) {
            return false;
        }
    }

    true
}

/// Narrow a record list to the subset matching the criteria
pub fn filter_records(
    records: &[EnrichedCertification],
    criteria: &FilterCriteria,
) -> Vec<EnrichedCertification> {
    records
        .iter()
        .filter(|cert| matches(cert, criteria))
        .cloned()
        .collect()
}

/// Portfolio counts for the admin stats row.
///
/// `expiring_30`/`expiring_90` overlap with `active`: an active record due
/// within 30 days is counted in all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total: usize,
    pub active: usize,
    pub expiring_30: usize,
    pub expiring_90: usize,
    pub expired: usize,
}

/// Count records by lifecycle bucket. Records without a usable expiry date
/// contribute to `total` only.
pub fn summarize(records: &[EnrichedCertification]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        total: records.len(),
        ..PortfolioSummary::default()
    };

    for cert in records {
        let Some(days) = cert.days_left else {
            continue;
        };

        if days < 0 {
            summary.expired += 1;
        } else {
            summary.active += 1;
            if days <= 30 {
                summary.expiring_30 += 1;
            }
            if days <= 90 {
                summary.expiring_90 += 1;
            }
        }
    }

    summary
}

/// One row of a breakdown table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

/// Count records grouped by an extracted label, descending by count.
///
/// Blank values bucket under [`UNSPECIFIED_LABEL`]; ties keep
/// first-encountered order.
pub fn count_by(
    records: &[EnrichedCertification],
    label_of: fn(&EnrichedCertification) -> Option<&str>,
) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = Vec::new();

    for cert in records {
        let label = label_of(cert)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(UNSPECIFIED_LABEL);

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.count += 1,
            None => groups.push(GroupCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

/// Breakdown of records by issuing provider
pub fn count_by_provider(records: &[EnrichedCertification]) -> Vec<GroupCount> {
    count_by(records, provider_of)
}

/// Breakdown of records by category
pub fn count_by_category(records: &[EnrichedCertification]) -> Vec<GroupCount> {
    count_by(records, category_of)
}

fn provider_of(cert: &EnrichedCertification) -> Option<&str> {
    cert.record.provider.as_deref()
}

fn category_of(cert: &EnrichedCertification) -> Option<&str> {
    cert.record.category.as_deref()
}

/// Field-level completeness for the admin data-quality panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub completeness_score: u8,
    pub missing_expiry: usize,
    pub missing_issue: usize,
    pub missing_provider: usize,
    pub missing_category: usize,
    pub missing_url: usize,
    pub missing_reference: usize,
}

/// Score how completely the six tracked optional fields are populated.
///
/// An empty record set is vacuously complete and scores 100.
pub fn assess_quality(records: &[EnrichedCertification]) -> DataQualityReport {
    if records.is_empty() {
        return DataQualityReport {
            completeness_score: 100,
            ..DataQualityReport::default()
        };
    }

    let mut report = DataQualityReport::default();
    for cert in records {
        let record = &cert.record;
        if record.expiry_date.is_none() {
            report.missing_expiry += 1;
        }
        if record.issue_date.is_none() {
            report.missing_issue += 1;
        }
        if !present(&record.provider) {
            report.missing_provider += 1;
        }
        if !present(&record.category) {
            report.missing_category += 1;
        }
        if !present(&record.cert_url) {
            report.missing_url += 1;
        }
        if !present(&record.cert_id) {
            report.missing_reference += 1;
        }
    }

    let total_fields = records.len() * TRACKED_FIELDS;
    let total_missing = report.missing_expiry
        + report.missing_issue
        + report.missing_provider
        + report.missing_category
        + report.missing_url
        + report.missing_reference;

    let score = 100.0 - (total_missing as f64 / total_fields as f64) * 100.0;
    report.completeness_score = score.round().max(0.0) as u8;
    report
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.is_empty())
}

/// Why a record was flagged on the admin issues panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnomalyReason {
    #[serde(rename = "Expiry before issue date")]
    ExpiryBeforeIssue,
    #[serde(rename = "Missing expiry date")]
    MissingExpiry,
}

impl AnomalyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyReason::ExpiryBeforeIssue => "Expiry before issue date",
            AnomalyReason::MissingExpiry => "Missing expiry date",
        }
    }
}

/// A record flagged for a data-quality issue
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub reason: AnomalyReason,
    pub certification: EnrichedCertification,
}

/// Flag records with inconsistent or missing dates, in list order, stopping
/// once `limit` flags are collected.
pub fn find_anomalies(records: &[EnrichedCertification], limit: usize) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for cert in records {
        if anomalies.len() >= limit {
            break;
        }

        let record = &cert.record;
        if let (Some(issue), Some(expiry)) = (record.issue_date, record.expiry_date) {
            if expiry < issue {
                anomalies.push(Anomaly {
                    reason: AnomalyReason::ExpiryBeforeIssue,
                    certification: cert.clone(),
                });
            }
        } else if record.expiry_date.is_none() {
            anomalies.push(Anomaly {
                reason: AnomalyReason::MissingExpiry,
                certification: cert.clone(),
            });
        }
    }

    anomalies
}

/// The upcoming renewal closest to the reference date, if any
pub fn next_renewal(records: &[EnrichedCertification]) -> Option<&EnrichedCertification> {
    records
        .iter()
        .filter(|cert| cert.days_left.is_some_and(|days| days >= 0))
        .min_by_key(|cert| cert.days_left)
}

/// Most recently dated records (issue date, falling back to expiry date),
/// newest first, capped at `limit`. Undated records sort last.
pub fn recent_additions(
    records: &[EnrichedCertification],
    limit: usize,
) -> Vec<EnrichedCertification> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| recency(b).cmp(&recency(a)));
    sorted.truncate(limit);
    sorted
}

fn recency(cert: &EnrichedCertification) -> Option<chrono::NaiveDate> {
    cert.record.issue_date.or(cert.record.expiry_date)
}
