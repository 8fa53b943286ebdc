//! Expiry derivation for certification records
//!
//! The reference date is always an explicit parameter so the logic stays
//! deterministic under test; callers pass the real current date at the
//! outermost layer only.

use chrono::NaiveDate;

use crate::models::{Certification, CertificationStatus, EnrichedCertification};

/// Records expiring within this many days count as "Expiring soon"
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Whole days from `today` until the expiry date.
///
/// Negative once the date has passed, zero on the expiry day itself, `None`
/// when the record has no usable expiry.
pub fn days_left(expiry_date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    expiry_date.map(|expiry| (expiry - today).num_days())
}

/// Classify a days-left value into a lifecycle status.
///
/// A record expiring exactly today is "Expiring soon", not "Expired".
pub fn status_for(days_left: Option<i64>) -> CertificationStatus {
    match days_left {
        None => CertificationStatus::Unknown,
        Some(days) if days < 0 => CertificationStatus::Expired,
        Some(days) if days <= EXPIRING_SOON_DAYS => CertificationStatus::ExpiringSoon,
        Some(_) => CertificationStatus::Active,
    }
}

/// Attach the derived expiry fields to a record
pub fn enrich(record: Certification, today: NaiveDate) -> EnrichedCertification {
    let days = days_left(record.expiry_date, today);
    EnrichedCertification {
        record,
        days_left: days,
        status: status_for(days),
    }
}

/// Enrich a whole record list against a single reference date
pub fn enrich_all(records: Vec<Certification>, today: NaiveDate) -> Vec<EnrichedCertification> {
    records
        .into_iter()
        .map(|record| enrich(record, today))
        .collect()
}

/// Render a date for table and CSV display, e.g. "11 May 2026"
pub fn format_display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => "-".to_string(),
    }
}
