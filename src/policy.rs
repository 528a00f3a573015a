use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Per-category dollar ceilings. A violation is a strict exceedance of the
/// ceiling; the limits themselves come from config, not code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyLimits {
    pub meals_per_txn: f64,
    pub travel_per_employee_day: f64,
    pub training_per_txn: f64,
    pub office_supplies_per_txn: f64,
    pub software_per_txn: f64,
}

impl Default for PolicyLimits {
    fn default() -> Self {
        Self {
            meals_per_txn: 55.0,
            travel_per_employee_day: 855.0,
            training_per_txn: 1400.0,
            office_supplies_per_txn: 650.0,
            software_per_txn: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TxnViolation {
    pub employee: String,
    pub vendor: String,
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub limit: f64,
}

/// Travel is capped per employee per day, so its violations are daily
/// aggregates rather than single transactions.
#[derive(Debug, Clone, Serialize)]
pub struct DailyTravelViolation {
    pub employee: String,
    pub date: NaiveDate,
    pub count: u64,
    pub total: f64,
    pub limit: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyReport {
    pub meals: Vec<TxnViolation>,
    pub travel: Vec<DailyTravelViolation>,
    pub training: Vec<TxnViolation>,
    pub office_supplies: Vec<TxnViolation>,
    pub software: Vec<TxnViolation>,
}

impl PolicyReport {
    pub fn violation_count(&self) -> usize {
        self.meals.len()
            + self.travel.len()
            + self.training.len()
            + self.office_supplies.len()
            + self.software.len()
    }
}

fn txn_violations(txns: &[Transaction], category: &str, limit: f64) -> Vec<TxnViolation> {
    let mut hits: Vec<TxnViolation> = txns
        .iter()
        .filter(|t| t.category == category && t.amount > limit)
        .map(|t| TxnViolation {
            employee: t.employee.clone(),
            vendor: t.vendor_name().to_string(),
            date: t.date,
            amount: t.amount,
            limit,
        })
        .collect();
    hits.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits
}

fn daily_travel_violations(txns: &[Transaction], limit: f64) -> Vec<DailyTravelViolation> {
    use std::collections::BTreeMap;

    let mut daily: BTreeMap<(String, NaiveDate), (u64, f64)> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.category == "Travel") {
        // Undated travel can't be attributed to a day; per-day checks skip it.
        if let Some(date) = t.date {
            let entry = daily.entry((t.employee.clone(), date)).or_default();
            entry.0 += 1;
            entry.1 += t.amount;
        }
    }
    daily
        .into_iter()
        .filter(|(_, (_, total))| *total > limit)
        .map(|((employee, date), (count, total))| DailyTravelViolation {
            employee,
            date,
            count,
            total,
            limit,
        })
        .collect()
}

/// Stateless scan of the whole dataset against every category ceiling.
pub fn check(txns: &[Transaction], limits: &PolicyLimits) -> PolicyReport {
    PolicyReport {
        meals: txn_violations(txns, "Meals", limits.meals_per_txn),
        travel: daily_travel_violations(txns, limits.travel_per_employee_day),
        training: txn_violations(txns, "Training", limits.training_per_txn),
        office_supplies: txn_violations(txns, "Office Supplies", limits.office_supplies_per_txn),
        software: txn_violations(txns, "Software", limits.software_per_txn),
    }
}
