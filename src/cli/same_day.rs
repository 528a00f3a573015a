use std::path::Path;

use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::{loader, reports};

pub fn run(file: &str, json: bool) -> Result<()> {
    let txns = loader::load_csv(Path::new(file))?;
    let rows = reports::same_day_vendor(&txns);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No same-day repeat vendor activity.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Employee", "Vendor", "Date", "Count", "Total"]);
    for r in &rows {
        table.add_row(vec![
            Cell::new(&r.employee),
            Cell::new(&r.vendor),
            Cell::new(r.date.to_string()),
            Cell::new(r.count),
            Cell::new(money(r.total)),
        ]);
    }
    println!("Same-Day Vendor Usage ({} groups)\n{table}", rows.len());
    Ok(())
}
