use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::config::Config;
use crate::error::Result;
use crate::fmt::money;
use crate::policy::{DailyTravelViolation, TxnViolation};
use crate::{loader, policy};

fn txn_section(title: &str, limit: f64, violations: &[TxnViolation]) {
    if violations.is_empty() {
        println!("{title} (limit {}): {}", money(limit), "no violations".green());
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Employee", "Vendor", "Date", "Amount", "Over By"]);
    for v in violations {
        table.add_row(vec![
            Cell::new(&v.employee),
            Cell::new(&v.vendor),
            Cell::new(v.date.map(|d| d.to_string()).unwrap_or_else(|| "—".to_string())),
            Cell::new(money(v.amount).red().to_string()),
            Cell::new(money(v.amount - v.limit)),
        ]);
    }
    println!("{title} (limit {})\n{table}\n", money(limit));
}

fn travel_section(limit: f64, violations: &[DailyTravelViolation]) {
    if violations.is_empty() {
        println!(
            "Travel per employee-day (limit {}): {}",
            money(limit),
            "no violations".green()
        );
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Employee", "Date", "Txns", "Daily Total", "Over By"]);
    for v in violations {
        table.add_row(vec![
            Cell::new(&v.employee),
            Cell::new(v.date.to_string()),
            Cell::new(v.count),
            Cell::new(money(v.total).red().to_string()),
            Cell::new(money(v.total - v.limit)),
        ]);
    }
    println!("Travel per employee-day (limit {})\n{table}\n", money(limit));
}

pub fn run(file: &str, config_path: Option<&str>, json: bool) -> Result<()> {
    let cfg = Config::load(config_path.map(Path::new))?;
    let txns = loader::load_csv(Path::new(file))?;
    let report = policy::check(&txns, &cfg.policy);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Policy Violations\n");
    txn_section("Meals per transaction", cfg.policy.meals_per_txn, &report.meals);
    travel_section(cfg.policy.travel_per_employee_day, &report.travel);
    txn_section(
        "Training per transaction",
        cfg.policy.training_per_txn,
        &report.training,
    );
    txn_section(
        "Office Supplies per transaction",
        cfg.policy.office_supplies_per_txn,
        &report.office_supplies,
    );
    txn_section(
        "Software per transaction",
        cfg.policy.software_per_txn,
        &report.software,
    );

    let count = report.violation_count();
    if count > 0 {
        eprintln!("{}", format!("{count} policy violation(s) found").yellow());
    }
    Ok(())
}
