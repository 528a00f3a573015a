use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{self, Aggregate};
use crate::config::{Config, Tier};
use crate::error::{Result, SpendError};
use crate::flags::{Flag, FlagRules};
use crate::models::Transaction;
use crate::stats;

fn by_total_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ---------------------------------------------------------------------------
// Vendor concentration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct VendorRow {
    pub vendor: String,
    pub total: f64,
    pub count: u64,
    pub percent_of_total: f64,
    pub z: f64,
    pub flag: Flag,
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorReport {
    pub total_spend: f64,
    pub rows: Vec<VendorRow>,
}

/// Per-vendor spend share with the ordered flag chain applied.
pub fn vendor_concentration(txns: &[Transaction], rules: &FlagRules) -> VendorReport {
    let mut groups: Vec<(String, Aggregate)> = aggregate::by_vendor(txns).into_iter().collect();
    groups.sort_by(|a, b| by_total_desc(a.1.total, b.1.total));

    let total_spend: f64 = groups.iter().map(|(_, a)| a.total).sum();
    let totals: Vec<f64> = groups.iter().map(|(_, a)| a.total).collect();
    let zs = stats::zscores(&totals);

    let rows = groups
        .into_iter()
        .zip(zs)
        .map(|((vendor, agg), z)| {
            let percent = if total_spend != 0.0 {
                agg.total / total_spend * 100.0
            } else {
                0.0
            };
            VendorRow {
                vendor,
                total: agg.total,
                count: agg.count,
                percent_of_total: percent,
                z,
                flag: rules.evaluate(percent, z, agg.count),
            }
        })
        .collect();

    VendorReport { total_spend, rows }
}

// ---------------------------------------------------------------------------
// Same-day repeat vendor usage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SameDayRow {
    pub employee: String,
    pub vendor: String,
    pub date: NaiveDate,
    pub count: u64,
    pub total: f64,
}

/// (employee, vendor, date) groups with more than one purchase, heaviest
/// repeat activity first.
pub fn same_day_vendor(txns: &[Transaction]) -> Vec<SameDayRow> {
    let mut rows: Vec<SameDayRow> = aggregate::by_employee_vendor_day(txns)
        .into_iter()
        .filter(|(_, a)| a.count > 1)
        .map(|((employee, vendor, date), a)| SameDayRow {
            employee,
            vendor,
            date,
            count: a.count,
            total: a.total,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(by_total_desc(a.total, b.total))
    });
    rows
}

// ---------------------------------------------------------------------------
// Monthly trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MonthRow {
    /// None gathers rows whose date failed to parse.
    pub month: Option<String>,
    pub total: f64,
    pub count: u64,
}

pub fn monthly_spend(txns: &[Transaction]) -> Vec<MonthRow> {
    let mut rows: Vec<MonthRow> = aggregate::by_month(txns)
        .into_iter()
        .map(|(month, a)| MonthRow {
            month,
            total: a.total,
            count: a.count,
        })
        .collect();
    // Chronological, with the undated bucket trailing
    rows.sort_by(|a, b| match (&a.month, &b.month) {
        (Some(x), Some(y)) => x.cmp(y),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    });
    rows
}

// ---------------------------------------------------------------------------
// Department overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentRow {
    pub department: String,
    pub total: f64,
    pub avg_per_txn: f64,
    /// Share of the department's transactions whose amount is a
    /// transaction-level outlier across the whole dataset.
    pub outlier_pct: f64,
    pub z_total: f64,
    pub z_avg: f64,
    pub z_outlier_pct: f64,
}

pub fn department_overview(txns: &[Transaction], txn_z_cutoff: f64) -> Vec<DepartmentRow> {
    let amounts: Vec<f64> = txns.iter().map(|t| t.amount).collect();
    let txn_z = stats::zscores(&amounts);

    let mut per: BTreeMap<String, (u64, f64, u64)> = BTreeMap::new();
    for (t, z) in txns.iter().zip(&txn_z) {
        let entry = per.entry(t.department.clone()).or_default();
        entry.0 += 1;
        entry.1 += t.amount;
        if z.abs() > txn_z_cutoff {
            entry.2 += 1;
        }
    }

    let mut rows: Vec<DepartmentRow> = per
        .into_iter()
        .map(|(department, (count, total, outliers))| DepartmentRow {
            department,
            total,
            avg_per_txn: total / count as f64,
            outlier_pct: outliers as f64 / count as f64 * 100.0,
            z_total: 0.0,
            z_avg: 0.0,
            z_outlier_pct: 0.0,
        })
        .collect();

    let z_total = stats::zscores(&rows.iter().map(|r| r.total).collect::<Vec<_>>());
    let z_avg = stats::zscores(&rows.iter().map(|r| r.avg_per_txn).collect::<Vec<_>>());
    let z_outlier = stats::zscores(&rows.iter().map(|r| r.outlier_pct).collect::<Vec<_>>());
    for (i, row) in rows.iter_mut().enumerate() {
        row.z_total = z_total[i];
        row.z_avg = z_avg[i];
        row.z_outlier_pct = z_outlier[i];
    }

    rows.sort_by(|a, b| by_total_desc(a.total, b.total));
    rows
}

// ---------------------------------------------------------------------------
// Department / category drilldown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ScoredGroup {
    pub name: String,
    pub total: f64,
    pub count: u64,
    pub z: f64,
    pub outlier: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TxnOutlier {
    pub date: Option<NaiveDate>,
    pub employee: String,
    pub vendor: String,
    pub amount: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarHit {
    pub date: NaiveDate,
    pub employee: String,
    pub vendor: String,
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrilldownReport {
    pub department: String,
    pub category: Option<String>,
    pub txn_count: usize,
    pub total_spend: f64,
    pub employees: Vec<ScoredGroup>,
    pub vendors: Vec<ScoredGroup>,
    pub monthly: Vec<MonthRow>,
    pub txn_outliers: Vec<TxnOutlier>,
    pub weekend: Vec<CalendarHit>,
    pub holiday: Vec<CalendarHit>,
    /// Expected categories with zero transactions in this department.
    pub missing_categories: Vec<String>,
}

fn scored_groups(groups: BTreeMap<String, Aggregate>, cutoff: f64) -> Vec<ScoredGroup> {
    let mut rows: Vec<(String, Aggregate)> = groups.into_iter().collect();
    rows.sort_by(|a, b| by_total_desc(a.1.total, b.1.total));
    let zs = stats::zscores(&rows.iter().map(|(_, a)| a.total).collect::<Vec<_>>());
    rows.into_iter()
        .zip(zs)
        .map(|((name, agg), z)| ScoredGroup {
            name,
            total: agg.total,
            count: agg.count,
            z,
            outlier: z.abs() > cutoff,
        })
        .collect()
}

fn calendar_hit(t: &Transaction, date: NaiveDate) -> CalendarHit {
    CalendarHit {
        date,
        employee: t.employee.clone(),
        vendor: t.vendor_name().to_string(),
        category: t.category.clone(),
        amount: t.amount,
    }
}

/// Focused review of one department, optionally narrowed to one category.
pub fn drilldown(
    txns: &[Transaction],
    department: &str,
    category: Option<&str>,
    cfg: &Config,
) -> Result<DrilldownReport> {
    let dept_txns: Vec<Transaction> = txns
        .iter()
        .filter(|t| t.department == department)
        .cloned()
        .collect();
    if dept_txns.is_empty() {
        return Err(SpendError::UnknownDepartment(department.to_string()));
    }

    // Category coverage is judged on the whole department, before any
    // category narrowing.
    let missing_categories: Vec<String> = cfg
        .expected_categories
        .iter()
        .filter(|c| !dept_txns.iter().any(|t| &t.category == *c))
        .cloned()
        .collect();

    let subset: Vec<Transaction> = match category {
        Some(c) => dept_txns
            .iter()
            .filter(|t| t.category == c)
            .cloned()
            .collect(),
        None => dept_txns,
    };

    let employees = scored_groups(aggregate::by_employee(&subset), cfg.employee_z_cutoff);
    let vendors = scored_groups(aggregate::by_vendor(&subset), cfg.drilldown_vendor_z_cutoff);
    let monthly = monthly_spend(&subset);

    let amounts: Vec<f64> = subset.iter().map(|t| t.amount).collect();
    let zs = stats::zscores(&amounts);
    let mut txn_outliers: Vec<TxnOutlier> = subset
        .iter()
        .zip(&zs)
        .filter(|(_, z)| z.abs() > cfg.txn_z_cutoff)
        .map(|(t, &z)| TxnOutlier {
            date: t.date,
            employee: t.employee.clone(),
            vendor: t.vendor_name().to_string(),
            amount: t.amount,
            z,
        })
        .collect();
    txn_outliers.sort_by(|a, b| b.z.abs().partial_cmp(&a.z.abs()).unwrap_or(Ordering::Equal));

    let mut weekend: Vec<CalendarHit> = subset
        .iter()
        .filter(|t| t.is_weekend())
        .filter_map(|t| t.date.map(|d| calendar_hit(t, d)))
        .collect();
    weekend.sort_by_key(|h| h.date);

    let mut holiday: Vec<CalendarHit> = subset
        .iter()
        .filter_map(|t| {
            t.date
                .filter(|d| cfg.is_holiday(*d))
                .map(|d| calendar_hit(t, d))
        })
        .collect();
    holiday.sort_by_key(|h| h.date);

    Ok(DrilldownReport {
        department: department.to_string(),
        category: category.map(str::to_string),
        txn_count: subset.len(),
        total_spend: subset.iter().map(|t| t.amount).sum(),
        employees,
        vendors,
        monthly,
        txn_outliers,
        weekend,
        holiday,
        missing_categories,
    })
}

// ---------------------------------------------------------------------------
// Category benchmarks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TierMidpoints {
    pub low: f64,
    pub medium_low: f64,
    pub medium: f64,
    pub medium_high: f64,
    pub high: f64,
}

impl TierMidpoints {
    pub fn for_tier(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Low => self.low,
            Tier::MediumLow => self.medium_low,
            Tier::Medium => self.medium,
            Tier::MediumHigh => self.medium_high,
            Tier::High => self.high,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkCell {
    pub department: String,
    pub category: String,
    pub percent_of_dept: f64,
    pub deviation_from_avg: f64,
    pub expected: Tier,
    pub deviation_from_expected: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub departments: Vec<String>,
    pub categories: Vec<String>,
    pub midpoints: TierMidpoints,
    pub cells: Vec<BenchmarkCell>,
}

impl BenchmarkReport {
    pub fn cell(&self, department: &str, category: &str) -> Option<&BenchmarkCell> {
        self.cells
            .iter()
            .find(|c| c.department == department && c.category == category)
    }
}

/// Department x category spend mix, scored against expected benchmark tiers.
/// Tier midpoints are derived from the 33rd/66th percentiles of the
/// deviation-from-average grid, the half-tiers sit between their neighbors.
pub fn category_benchmarks(txns: &[Transaction], cfg: &Config) -> BenchmarkReport {
    let dept_totals = aggregate::by_department(txns);
    let pair_totals = aggregate::by_department_category(txns);

    let departments: Vec<String> = dept_totals.keys().cloned().collect();
    let categories: Vec<String> = txns
        .iter()
        .map(|t| t.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut percent: BTreeMap<(String, String), f64> = BTreeMap::new();
    for ((dept, cat), agg) in &pair_totals {
        let dept_total = dept_totals[dept].total;
        let p = if dept_total != 0.0 {
            agg.total / dept_total * 100.0
        } else {
            0.0
        };
        percent.insert((dept.clone(), cat.clone()), p);
    }

    // Average share per category across the departments that use it
    let mut cat_sums: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for ((_, cat), p) in &percent {
        let entry = cat_sums.entry(cat.as_str()).or_default();
        entry.0 += p;
        entry.1 += 1;
    }
    let cat_avg: BTreeMap<&str, f64> = cat_sums
        .into_iter()
        .map(|(cat, (sum, n))| (cat, sum / n as f64))
        .collect();

    // Full grid of deviations; pairs with no spend deviate by definition 0
    let mut grid: Vec<(String, String, f64, f64)> = Vec::new();
    for dept in &departments {
        for cat in &categories {
            let (pct, dev) = match percent.get(&(dept.clone(), cat.clone())) {
                Some(p) => (*p, p - cat_avg[cat.as_str()]),
                None => (0.0, 0.0),
            };
            grid.push((dept.clone(), cat.clone(), pct, dev));
        }
    }

    let mut sorted: Vec<f64> = grid.iter().map(|(_, _, _, d)| *d).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let low_cutoff = stats::percentile(&sorted, 33.0);
    let high_cutoff = stats::percentile(&sorted, 66.0);

    let below: Vec<f64> = sorted.iter().copied().filter(|v| *v < low_cutoff).collect();
    let middle: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v >= low_cutoff && *v <= high_cutoff)
        .collect();
    let above: Vec<f64> = sorted.iter().copied().filter(|v| *v > high_cutoff).collect();

    let low = stats::mean(&below);
    let medium = stats::mean(&middle);
    let high = stats::mean(&above);
    let midpoints = TierMidpoints {
        low,
        medium_low: (low + medium) / 2.0,
        medium,
        medium_high: (medium + high) / 2.0,
        high,
    };

    let cells = grid
        .into_iter()
        .map(|(department, category, percent_of_dept, deviation_from_avg)| {
            let expected = cfg.expected_tier(&department, &category);
            BenchmarkCell {
                deviation_from_expected: deviation_from_avg - midpoints.for_tier(expected),
                department,
                category,
                percent_of_dept,
                deviation_from_avg,
                expected,
            }
        })
        .collect();

    BenchmarkReport {
        departments,
        categories,
        midpoints,
        cells,
    }
}
