use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Transaction;

/// Count and sum for one group. Recomputed on every run, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub count: u64,
    pub total: f64,
}

impl Aggregate {
    fn add(&mut self, amount: f64) {
        self.count += 1;
        self.total += amount;
    }
}

/// Group transactions by a key projection. Every record lands in exactly one
/// bucket, so summing group totals always reproduces the dataset total.
/// No ordering is promised beyond key order; report builders sort explicitly.
pub fn group_by<K, F>(txns: &[Transaction], key: F) -> BTreeMap<K, Aggregate>
where
    K: Ord,
    F: Fn(&Transaction) -> K,
{
    let mut groups: BTreeMap<K, Aggregate> = BTreeMap::new();
    for t in txns {
        groups.entry(key(t)).or_default().add(t.amount);
    }
    groups
}

// ---------------------------------------------------------------------------
// Concrete projections
// ---------------------------------------------------------------------------

pub fn by_vendor(txns: &[Transaction]) -> BTreeMap<String, Aggregate> {
    group_by(txns, |t| t.vendor_name().to_string())
}

pub fn by_employee(txns: &[Transaction]) -> BTreeMap<String, Aggregate> {
    group_by(txns, |t| t.employee.clone())
}

pub fn by_department(txns: &[Transaction]) -> BTreeMap<String, Aggregate> {
    group_by(txns, |t| t.department.clone())
}

pub fn by_department_category(txns: &[Transaction]) -> BTreeMap<(String, String), Aggregate> {
    group_by(txns, |t| (t.department.clone(), t.category.clone()))
}

/// Undated rows group under None so nothing silently drops out of the trend.
pub fn by_month(txns: &[Transaction]) -> BTreeMap<Option<String>, Aggregate> {
    group_by(txns, |t| t.month())
}

/// Same-day repeat detection needs a real date; undated rows are excluded here.
pub fn by_employee_vendor_day(
    txns: &[Transaction],
) -> BTreeMap<(String, String, NaiveDate), Aggregate> {
    let mut groups: BTreeMap<(String, String, NaiveDate), Aggregate> = BTreeMap::new();
    for t in txns {
        if let Some(date) = t.date {
            groups
                .entry((t.employee.clone(), t.vendor_name().to_string(), date))
                .or_default()
                .add(t.amount);
        }
    }
    groups
}
