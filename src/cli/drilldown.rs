use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::config::Config;
use crate::error::Result;
use crate::fmt::{money, zscore};
use crate::reports::{CalendarHit, ScoredGroup};
use crate::{loader, reports};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: &str,
    config_path: Option<&str>,
    department: &str,
    category: Option<&str>,
    employee_z: Option<f64>,
    vendor_z: Option<f64>,
    txn_z: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut cfg = Config::load(config_path.map(Path::new))?;
    if let Some(z) = employee_z {
        cfg.employee_z_cutoff = z;
    }
    if let Some(z) = vendor_z {
        cfg.drilldown_vendor_z_cutoff = z;
    }
    if let Some(z) = txn_z {
        cfg.txn_z_cutoff = z;
    }

    let txns = loader::load_csv(Path::new(file))?;
    let report = reports::drilldown(&txns, department, category, &cfg)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let scope = match &report.category {
        Some(c) => format!("{} — {}", report.department, c),
        None => report.department.clone(),
    };
    println!(
        "Drilldown: {scope} ({} transactions, total: {})\n",
        report.txn_count,
        money(report.total_spend)
    );

    scored_table("Spend by Employee", &report.employees);
    scored_table("Spend by Vendor", &report.vendors);

    if !report.monthly.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Month", "Total", "Txns"]);
        for m in &report.monthly {
            table.add_row(vec![
                Cell::new(m.month.as_deref().unwrap_or("(no date)")),
                Cell::new(money(m.total)),
                Cell::new(m.count),
            ]);
        }
        println!("Monthly Trend\n{table}\n");
    }

    if report.txn_outliers.is_empty() {
        println!("No transaction-level outliers (|z| > {}).", cfg.txn_z_cutoff);
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Date", "Employee", "Vendor", "Amount", "Z"]);
        for t in &report.txn_outliers {
            table.add_row(vec![
                Cell::new(t.date.map(|d| d.to_string()).unwrap_or_else(|| "—".to_string())),
                Cell::new(&t.employee),
                Cell::new(&t.vendor),
                Cell::new(money(t.amount).red().to_string()),
                Cell::new(zscore(t.z)),
            ]);
        }
        println!("Transaction Outliers (|z| > {})\n{table}", cfg.txn_z_cutoff);
    }
    println!();

    calendar_table("Weekend Transactions", &report.weekend);
    calendar_table("Holiday Transactions", &report.holiday);

    for cat in &report.missing_categories {
        eprintln!(
            "{}",
            format!("No {cat} spend found for {}", report.department).yellow()
        );
    }
    Ok(())
}

fn scored_table(title: &str, groups: &[ScoredGroup]) {
    if groups.is_empty() {
        println!("{title}: no transactions.\n");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Name", "Total", "Txns", "Z", "Outlier"]);
    for g in groups {
        let marker = if g.outlier {
            "yes".yellow().to_string()
        } else {
            String::new()
        };
        table.add_row(vec![
            Cell::new(&g.name),
            Cell::new(money(g.total)),
            Cell::new(g.count),
            super::z_cell(g.z),
            Cell::new(marker),
        ]);
    }
    println!("{title}\n{table}\n");
}

fn calendar_table(title: &str, hits: &[CalendarHit]) {
    if hits.is_empty() {
        println!("{}", format!("No {}.", title.to_lowercase()).green());
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Date", "Employee", "Vendor", "Category", "Amount"]);
    for h in hits {
        table.add_row(vec![
            Cell::new(h.date.to_string()),
            Cell::new(&h.employee),
            Cell::new(&h.vendor),
            Cell::new(&h.category),
            Cell::new(money(h.amount)),
        ]);
    }
    println!("{title}\n{table}\n");
}
