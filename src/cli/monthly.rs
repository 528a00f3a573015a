use std::path::Path;

use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::{bar, money};
use crate::{loader, reports};

pub fn run(file: &str, json: bool) -> Result<()> {
    let txns = loader::load_csv(Path::new(file))?;
    let rows = reports::monthly_spend(&txns);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let max = rows.iter().map(|r| r.total).fold(0.0f64, f64::max);
    let mut table = Table::new();
    table.set_header(vec!["Month", "Total Spend", "Txns", "Trend"]);
    for r in &rows {
        table.add_row(vec![
            Cell::new(r.month.as_deref().unwrap_or("(no date)")),
            Cell::new(money(r.total)),
            Cell::new(r.count),
            Cell::new(bar(r.total, max, 30)),
        ]);
    }
    let grand_total: f64 = rows.iter().map(|r| r.total).sum();
    println!(
        "Monthly Spend ({} months, total: {})\n{table}",
        rows.len(),
        money(grand_total)
    );
    Ok(())
}
