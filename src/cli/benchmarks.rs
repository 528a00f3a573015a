use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::config::Config;
use crate::error::Result;
use crate::{loader, reports};

/// Color a deviation-from-expected value: hot when well above the benchmark
/// tier, cold when well below.
fn deviation_cell(dev: f64) -> Cell {
    let text = format!("{dev:+.1}");
    let text = if dev >= 5.0 {
        text.red().to_string()
    } else if dev <= -5.0 {
        text.cyan().to_string()
    } else {
        text
    };
    Cell::new(text)
}

pub fn run(file: &str, config_path: Option<&str>, json: bool) -> Result<()> {
    let cfg = Config::load(config_path.map(Path::new))?;
    let txns = loader::load_csv(Path::new(file))?;
    let report = reports::category_benchmarks(&txns, &cfg);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Heatmap: departments down, categories across
    let mut table = Table::new();
    let mut header = vec![Cell::new("Department")];
    header.extend(report.categories.iter().map(Cell::new));
    table.set_header(header);
    for dept in &report.departments {
        let mut row = vec![Cell::new(dept)];
        for cat in &report.categories {
            let cell = report
                .cell(dept, cat)
                .map(|c| deviation_cell(c.deviation_from_expected))
                .unwrap_or_else(|| Cell::new(""));
            row.push(cell);
        }
        table.add_row(row);
    }
    println!("Deviation from Expected Benchmark (pct points)\n{table}\n");

    let mut tiers = Table::new();
    tiers.set_header(vec!["Tier", "Midpoint"]);
    for (label, mid) in [
        ("Low", report.midpoints.low),
        ("Medium-Low", report.midpoints.medium_low),
        ("Medium", report.midpoints.medium),
        ("Medium-High", report.midpoints.medium_high),
        ("High", report.midpoints.high),
    ] {
        tiers.add_row(vec![Cell::new(label), Cell::new(format!("{mid:+.2}"))]);
    }
    println!("Benchmark Tier Midpoints\n{tiers}");
    Ok(())
}
