use std::path::Path;

use comfy_table::{Cell, Table};

use crate::config::Config;
use crate::error::Result;
use crate::fmt::{money, pct};
use crate::{loader, reports};

pub fn run(file: &str, config_path: Option<&str>, z_cutoff: Option<f64>, json: bool) -> Result<()> {
    let cfg = Config::load(config_path.map(Path::new))?;
    let cutoff = z_cutoff.unwrap_or(cfg.txn_z_cutoff);

    let txns = loader::load_csv(Path::new(file))?;
    let rows = reports::department_overview(&txns, cutoff);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Department",
        "Total Spend",
        "Avg / Txn",
        "Outlier %",
        "Z Total",
        "Z Avg",
        "Z Outlier",
    ]);
    for r in &rows {
        table.add_row(vec![
            Cell::new(&r.department),
            Cell::new(money(r.total)),
            Cell::new(money(r.avg_per_txn)),
            Cell::new(pct(r.outlier_pct)),
            super::z_cell(r.z_total),
            super::z_cell(r.z_avg),
            super::z_cell(r.z_outlier_pct),
        ]);
    }
    println!(
        "Department Overview ({} departments, txn |z| > {cutoff})\n{table}",
        rows.len()
    );
    Ok(())
}
