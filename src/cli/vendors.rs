use std::path::Path;

use comfy_table::{Cell, Table};

use crate::config::Config;
use crate::error::Result;
use crate::fmt::{money, pct};
use crate::{loader, reports};

pub fn run(
    file: &str,
    config_path: Option<&str>,
    hard_high_pct: Option<f64>,
    z_cutoff: Option<f64>,
    json: bool,
) -> Result<()> {
    let cfg = Config::load(config_path.map(Path::new))?;
    let mut rules = cfg.vendor_rules;
    if let Some(p) = hard_high_pct {
        rules.hard_high_pct = p;
    }
    if let Some(z) = z_cutoff {
        rules.z_cutoff = z;
    }

    let txns = loader::load_csv(Path::new(file))?;
    let report = reports::vendor_concentration(&txns, &rules);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Vendor", "Total Spend", "% of Total", "Z", "Count", "Flag"]);
    for row in &report.rows {
        table.add_row(vec![
            Cell::new(&row.vendor),
            Cell::new(money(row.total)),
            Cell::new(pct(row.percent_of_total)),
            super::z_cell(row.z),
            Cell::new(row.count),
            super::flag_cell(row.flag),
        ]);
    }
    println!(
        "Vendor Concentration ({} vendors, total spend: {})\n{table}",
        report.rows.len(),
        money(report.total_spend)
    );
    Ok(())
}
