use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Bucket name for records with a blank vendor field.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// One expense row after load. Never mutated; every report recomputes
/// its aggregates from scratch.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub employee: String,
    pub vendor: Option<String>,
    pub department: String,
    pub category: String,
    /// None when the source date was blank or unparseable.
    pub date: Option<NaiveDate>,
    pub amount: f64,
}

impl Transaction {
    pub fn vendor_name(&self) -> &str {
        self.vendor.as_deref().unwrap_or(UNKNOWN_VENDOR)
    }

    pub fn is_weekend(&self) -> bool {
        matches!(
            self.date.map(|d| d.weekday()),
            Some(Weekday::Sat) | Some(Weekday::Sun)
        )
    }

    /// `YYYY-MM` of the transaction date, if dated.
    pub fn month(&self) -> Option<String> {
        self.date
            .map(|d| format!("{:04}-{:02}", d.year(), d.month()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(date: Option<&str>) -> Transaction {
        Transaction {
            employee: "Ana Ruiz".to_string(),
            vendor: None,
            department: "Sales".to_string(),
            category: "Meals".to_string(),
            date: date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            amount: 10.0,
        }
    }

    #[test]
    fn test_vendor_name_defaults_to_unknown() {
        let mut t = txn(None);
        assert_eq!(t.vendor_name(), "Unknown");
        t.vendor = Some("Staples".to_string());
        assert_eq!(t.vendor_name(), "Staples");
    }

    #[test]
    fn test_is_weekend() {
        assert!(txn(Some("2025-01-18")).is_weekend()); // Saturday
        assert!(txn(Some("2025-01-19")).is_weekend()); // Sunday
        assert!(!txn(Some("2025-01-20")).is_weekend()); // Monday
        assert!(!txn(None).is_weekend());
    }

    #[test]
    fn test_month_key() {
        assert_eq!(txn(Some("2025-03-05")).month().as_deref(), Some("2025-03"));
        assert_eq!(txn(None).month(), None);
    }
}
