//! Certification record models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A certification record as persisted by the store and served by the API.
///
/// Only `name` is required; every other attribute is free text or a nullable
/// calendar date. Serialized camelCase, matching the dashboard wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub name: String,
    pub provider: Option<String>,
    pub category: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub cert_id: Option<String>,
    pub cert_url: Option<String>,
    pub notes: Option<String>,
}

/// Input for creating a certification
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCertification {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub provider: Option<String>,
    pub category: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub cert_id: Option<String>,
    pub cert_url: Option<String>,
    pub notes: Option<String>,
}

/// Lifecycle status derived from a record's expiry date.
///
/// Never persisted; recomputed from the expiry date and a reference date on
/// every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificationStatus {
    Active,
    #[serde(rename = "Expiring soon")]
    ExpiringSoon,
    Expired,
    Unknown,
}

impl CertificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationStatus::Active => "Active",
            CertificationStatus::ExpiringSoon => "Expiring soon",
            CertificationStatus::Expired => "Expired",
            CertificationStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CertificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CertificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CertificationStatus::Active),
            "expiring soon" => Ok(CertificationStatus::ExpiringSoon),
            "expired" => Ok(CertificationStatus::Expired),
            "unknown" => Ok(CertificationStatus::Unknown),
            other => Err(format!("Invalid certification status: {}", other)),
        }
    }
}

/// Listing order shared by every record store implementation: expiry
/// ascending with undated records last, then name ascending.
pub fn listing_order(a: &Certification, b: &Certification) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (a.expiry_date, b.expiry_date) {
        (Some(left), Some(right)) => left.cmp(&right).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

/// A certification together with its derived expiry fields.
///
/// `days_left` is `None` when the record has no usable expiry date; the
/// serialized form carries an explicit `null` so the dashboard can tell
/// "unknown" apart from zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCertification {
    #[serde(flatten)]
    pub record: Certification,
    pub days_left: Option<i64>,
    pub status: CertificationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Certification {
        Certification {
            id: Uuid::new_v4(),
            name: "AWS Solutions Architect".to_string(),
            provider: Some("AWS".to_string()),
            category: Some("Cloud".to_string()),
            issue_date: NaiveDate::from_ymd_opt(2023, 5, 11),
            expiry_date: NaiveDate::from_ymd_opt(2026, 5, 11),
            cert_id: Some("AWS-123456".to_string()),
            cert_url: None,
            notes: None,
        }
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("issueDate").is_some());
        assert!(value.get("expiryDate").is_some());
        assert!(value.get("certId").is_some());
        assert!(value.get("issue_date").is_none());
    }

    #[test]
    fn status_round_trips_through_display() {
        for status in [
            CertificationStatus::Active,
            CertificationStatus::ExpiringSoon,
            CertificationStatus::Expired,
            CertificationStatus::Unknown,
        ] {
            let parsed: CertificationStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(
            "EXPIRING SOON".parse::<CertificationStatus>().unwrap(),
            CertificationStatus::ExpiringSoon
        );
        assert!("renewed".parse::<CertificationStatus>().is_err());
    }

    #[test]
    fn listing_order_puts_undated_records_last() {
        let mut a = sample();
        a.name = "B".to_string();
        a.expiry_date = NaiveDate::from_ymd_opt(2026, 1, 1);
        let mut b = sample();
        b.name = "A".to_string();
        b.expiry_date = NaiveDate::from_ymd_opt(2026, 1, 1);
        let mut undated = sample();
        undated.name = "0-first-by-name".to_string();
        undated.expiry_date = None;

        let mut records = vec![undated.clone(), a.clone(), b.clone()];
        records.sort_by(listing_order);

        // Same expiry ties break on name; missing expiry sorts last.
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "0-first-by-name"]);
    }

    #[test]
    fn new_certification_requires_name() {
        let input = NewCertification {
            name: String::new(),
            provider: None,
            category: None,
            issue_date: None,
            expiry_date: None,
            cert_id: None,
            cert_url: None,
            notes: None,
        };
        assert!(input.validate().is_err());
    }
}
