mod aggregate;
mod cli;
mod config;
mod error;
mod flags;
mod fmt;
mod loader;
mod models;
mod policy;
mod reports;
mod stats;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match &cli.command {
        Commands::Vendors {
            file,
            hard_high_pct,
            z_cutoff,
            json,
        } => cli::vendors::run(file, config_path, *hard_high_pct, *z_cutoff, *json),
        Commands::SameDay { file, json } => cli::same_day::run(file, *json),
        Commands::Policy { file, json } => cli::policy::run(file, config_path, *json),
        Commands::Monthly { file, json } => cli::monthly::run(file, *json),
        Commands::Departments {
            file,
            z_cutoff,
            json,
        } => cli::departments::run(file, config_path, *z_cutoff, *json),
        Commands::Drilldown {
            file,
            department,
            category,
            employee_z,
            vendor_z,
            txn_z,
            json,
        } => cli::drilldown::run(
            file,
            config_path,
            department,
            category.as_deref(),
            *employee_z,
            *vendor_z,
            *txn_z,
            *json,
        ),
        Commands::Benchmarks { file, json } => cli::benchmarks::run(file, config_path, *json),
        Commands::Completions { shell } => cli::completions::run(*shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
