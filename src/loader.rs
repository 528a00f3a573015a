use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Result, SpendError};
use crate::models::Transaction;

const REQUIRED_COLUMNS: [&str; 6] = [
    "employee",
    "vendor",
    "department",
    "category",
    "date",
    "amount",
];

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

/// Dates show up as ISO in some exports and US-style in others. Anything
/// unparseable becomes None rather than rejecting the row.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// load_csv
// ---------------------------------------------------------------------------

/// Read an expense CSV into memory. The header must carry all six expected
/// columns (any order, case-insensitive); a missing column or a non-numeric
/// amount fails the whole load with a descriptive error.
pub fn load_csv(path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(std::io::BufReader::new(file));

    let headers = rdr.headers()?.clone();
    let mut idx = [0usize; 6];
    for (i, name) in REQUIRED_COLUMNS.iter().enumerate() {
        idx[i] = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| SpendError::MissingColumn(name.to_string()))?;
    }
    let [i_emp, i_ven, i_dept, i_cat, i_date, i_amt] = idx;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw_amount = record.get(i_amt).unwrap_or("");
        let amount = parse_amount(raw_amount).ok_or_else(|| SpendError::InvalidAmount {
            line,
            value: raw_amount.to_string(),
        })?;
        let vendor = record
            .get(i_ven)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        rows.push(Transaction {
            employee: record.get(i_emp).unwrap_or("").to_string(),
            vendor,
            department: record.get(i_dept).unwrap_or("").to_string(),
            category: record.get(i_cat).unwrap_or("").to_string(),
            date: record.get(i_date).and_then(parse_date),
            amount,
        });
    }

    if rows.is_empty() {
        return Err(SpendError::EmptyDataset(path.display().to_string()));
    }
    Ok(rows)
}
