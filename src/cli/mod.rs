pub mod benchmarks;
pub mod completions;
pub mod departments;
pub mod drilldown;
pub mod monthly;
pub mod policy;
pub mod same_day;
pub mod vendors;

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::Cell;

use crate::flags::Flag;

#[derive(Parser)]
#[command(
    name = "spendcheck",
    about = "Expense anomaly and policy review for small-company transaction data."
)]
pub struct Cli {
    /// Path to a JSON config with thresholds, policy limits and benchmarks
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Vendor concentration: spend share, z-score and risk flag per vendor.
    Vendors {
        /// Path to the expense CSV
        file: String,
        /// Percent-of-total ceiling for the Hard-High flag (inclusive)
        #[arg(long = "hard-high-pct")]
        hard_high_pct: Option<f64>,
        /// Z-score cutoff for the Z-Outlier flag
        #[arg(long = "z-cutoff")]
        z_cutoff: Option<f64>,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Employees with multiple same-day purchases from one vendor.
    SameDay {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Per-category spending ceiling violations.
    Policy {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Company-wide monthly spend trend.
    Monthly {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Per-department totals, averages and outlier rates, z-scored.
    Departments {
        file: String,
        /// Transaction-level |z| cutoff feeding the outlier rate
        #[arg(long = "z-cutoff")]
        z_cutoff: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Focused review of one department, optionally one category.
    Drilldown {
        file: String,
        /// Department to inspect
        #[arg(long)]
        department: String,
        /// Narrow to a single category
        #[arg(long)]
        category: Option<String>,
        /// Employee spend |z| cutoff
        #[arg(long = "employee-z")]
        employee_z: Option<f64>,
        /// Vendor spend |z| cutoff
        #[arg(long = "vendor-z")]
        vendor_z: Option<f64>,
        /// Transaction |z| cutoff
        #[arg(long = "txn-z")]
        txn_z: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Department x category spend mix vs expected benchmark tiers.
    Benchmarks {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions.
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

/// Colored table cell for a risk flag.
pub(crate) fn flag_cell(flag: Flag) -> Cell {
    let text = match flag {
        Flag::HardHigh => flag.label().red().bold().to_string(),
        Flag::ZOutlier | Flag::SingleUse => flag.label().yellow().to_string(),
        Flag::Ok => flag.label().green().to_string(),
    };
    Cell::new(text)
}

/// Colored table cell for a z-score: hot values red, cold values cyan.
pub(crate) fn z_cell(z: f64) -> Cell {
    let text = crate::fmt::zscore(z);
    let text = if z >= 1.0 {
        text.red().to_string()
    } else if z <= -1.0 {
        text.cyan().to_string()
    } else {
        text
    };
    Cell::new(text)
}
