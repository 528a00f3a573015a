use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpendError};
use crate::flags::FlagRules;
use crate::policy::PolicyLimits;

/// Expected-spend bucket for a department/category pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Low,
    #[serde(rename = "Medium-Low")]
    MediumLow,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::MediumLow => "Medium-Low",
            Self::Medium => "Medium",
            Self::MediumHigh => "Medium-High",
            Self::High => "High",
        }
    }
}

/// Every threshold the reports use, in one place. Defaults reproduce the
/// historical review rules; a JSON file or CLI flags can override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vendor concentration chain: 30% share (inclusive), one-sided z > 1.96.
    pub vendor_rules: FlagRules,
    /// Transaction-level outliers (departments overview and drilldowns), |z|.
    pub txn_z_cutoff: f64,
    /// Employee spend outliers in drilldowns, |z|.
    pub employee_z_cutoff: f64,
    /// Vendor spend outliers in drilldowns, |z|.
    pub drilldown_vendor_z_cutoff: f64,
    pub policy: PolicyLimits,
    /// Company holidays worth flagging activity on.
    pub holidays: Vec<NaiveDate>,
    /// Categories every department is expected to use at least once.
    pub expected_categories: Vec<String>,
    /// department -> category -> expected benchmark tier.
    pub expected_tiers: BTreeMap<String, BTreeMap<String, Tier>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor_rules: FlagRules::one_sided(30.0, 1.96),
            txn_z_cutoff: 1.5,
            employee_z_cutoff: 1.0,
            drilldown_vendor_z_cutoff: 1.5,
            policy: PolicyLimits::default(),
            holidays: default_holidays(),
            expected_categories: default_expected_categories(),
            expected_tiers: default_expected_tiers(),
        }
    }
}

fn default_holidays() -> Vec<NaiveDate> {
    [
        (2024, 7, 4),
        (2024, 9, 2),
        (2024, 11, 28),
        (2024, 12, 25),
        (2025, 1, 1),
        (2025, 1, 20),
        (2025, 2, 17),
        (2025, 5, 26),
        (2025, 7, 4),
    ]
    .iter()
    .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
    .collect()
}

fn default_expected_categories() -> Vec<String> {
    ["Meals", "Office Supplies", "Software", "Training", "Travel"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_expected_tiers() -> BTreeMap<String, BTreeMap<String, Tier>> {
    use Tier::*;
    let table: [(&str, [(&str, Tier); 5]); 5] = [
        (
            "Engineering",
            [
                ("Meals", Low),
                ("Office Supplies", MediumLow),
                ("Software", High),
                ("Training", MediumHigh),
                ("Travel", Low),
            ],
        ),
        (
            "Marketing",
            [
                ("Meals", High),
                ("Office Supplies", Medium),
                ("Software", MediumHigh),
                ("Training", Medium),
                ("Travel", High),
            ],
        ),
        (
            "Sales",
            [
                ("Meals", High),
                ("Office Supplies", Low),
                ("Software", MediumHigh),
                ("Training", MediumHigh),
                ("Travel", High),
            ],
        ),
        (
            "HR",
            [
                ("Meals", Medium),
                ("Office Supplies", Medium),
                ("Software", Low),
                ("Training", High),
                ("Travel", Medium),
            ],
        ),
        (
            "IT",
            [
                ("Meals", Low),
                ("Office Supplies", Medium),
                ("Software", High),
                ("Training", High),
                ("Travel", Low),
            ],
        ),
    ];
    table
        .iter()
        .map(|(dept, cats)| {
            (
                dept.to_string(),
                cats.iter()
                    .map(|(c, t)| (c.to_string(), *t))
                    .collect::<BTreeMap<_, _>>(),
            )
        })
        .collect()
}

impl Config {
    /// Expected tier for a department/category pair; unlisted pairs sit in
    /// the middle of the road.
    pub fn expected_tier(&self, department: &str, category: &str) -> Tier {
        self.expected_tiers
            .get(department)
            .and_then(|cats| cats.get(category))
            .copied()
            .unwrap_or(Tier::Medium)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Load from an explicit `--config` path, else `~/.config/spendcheck/
    /// config.json` if present, else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = default_config_path();
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };
        let content = std::fs::read_to_string(&path)
            .map_err(|e| SpendError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| SpendError::Config(format!("{}: {e}", path.display())))
    }
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("spendcheck")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_review_rules() {
        let cfg = Config::default();
        assert_eq!(cfg.vendor_rules.hard_high_pct, 30.0);
        assert_eq!(cfg.vendor_rules.z_cutoff, 1.96);
        assert!(!cfg.vendor_rules.two_sided);
        assert_eq!(cfg.policy.meals_per_txn, 55.0);
        assert_eq!(cfg.policy.travel_per_employee_day, 855.0);
        assert_eq!(cfg.holidays.len(), 9);
    }

    #[test]
    fn test_expected_tier_lookup_and_fallback() {
        let cfg = Config::default();
        assert_eq!(cfg.expected_tier("Sales", "Travel"), Tier::High);
        assert_eq!(cfg.expected_tier("Engineering", "Meals"), Tier::Low);
        assert_eq!(cfg.expected_tier("Legal", "Meals"), Tier::Medium);
    }

    #[test]
    fn test_partial_config_file_merges_with_defaults() {
        let json = r#"{"txn_z_cutoff": 2.0, "policy": {"meals_per_txn": 40.0}}"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.txn_z_cutoff, 2.0);
        assert_eq!(cfg.policy.meals_per_txn, 40.0);
        // Untouched fields keep their defaults
        assert_eq!(cfg.policy.software_per_txn, 2000.0);
        assert_eq!(cfg.employee_z_cutoff, 1.0);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Config error"), "got: {err}");
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let cfg = Config::default();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.expected_tier("IT", "Software"), Tier::High);
        assert_eq!(back.holidays, cfg.holidays);
    }
}
