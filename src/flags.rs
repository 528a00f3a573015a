use serde::{Deserialize, Serialize};

/// Qualitative label assigned to one group aggregate. Lives only for the
/// duration of a report, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flag {
    Ok,
    SingleUse,
    ZOutlier,
    HardHigh,
}

impl Flag {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::SingleUse => "Single-Use",
            Self::ZOutlier => "Z-Outlier",
            Self::HardHigh => "Hard-High",
        }
    }
}

/// Threshold set for one call site. Different reports run different cutoffs,
/// so none of these are constants in the scorer itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlagRules {
    /// Percent-of-total concentration ceiling; the bound is inclusive.
    pub hard_high_pct: f64,
    pub z_cutoff: f64,
    /// When true, |z| is compared against the cutoff; when false only the
    /// high side flags.
    pub two_sided: bool,
}

impl FlagRules {
    pub fn one_sided(hard_high_pct: f64, z_cutoff: f64) -> Self {
        Self {
            hard_high_pct,
            z_cutoff,
            two_sided: false,
        }
    }

    pub fn z_exceeds(&self, z: f64) -> bool {
        if self.two_sided {
            z.abs() > self.z_cutoff
        } else {
            z > self.z_cutoff
        }
    }

    /// Ordered rule chain; the first matching rule wins.
    pub fn evaluate(&self, percent_of_total: f64, z: f64, count: u64) -> Flag {
        if percent_of_total >= self.hard_high_pct {
            return Flag::HardHigh;
        }
        if self.z_exceeds(z) {
            return Flag::ZOutlier;
        }
        if count == 1 {
            return Flag::SingleUse;
        }
        Flag::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> FlagRules {
        FlagRules::one_sided(30.0, 1.96)
    }

    #[test]
    fn test_hard_high_boundary_is_inclusive() {
        assert_eq!(rules().evaluate(30.0, 0.0, 5), Flag::HardHigh);
        assert_eq!(rules().evaluate(29.99, 0.0, 5), Flag::Ok);
    }

    #[test]
    fn test_hard_high_wins_over_z_outlier() {
        assert_eq!(rules().evaluate(45.0, 3.0, 1), Flag::HardHigh);
    }

    #[test]
    fn test_z_outlier_wins_over_single_use() {
        assert_eq!(rules().evaluate(10.0, 2.5, 1), Flag::ZOutlier);
    }

    #[test]
    fn test_single_use_when_no_higher_rule_matches() {
        assert_eq!(rules().evaluate(10.0, 0.5, 1), Flag::SingleUse);
        assert_eq!(rules().evaluate(10.0, 0.5, 2), Flag::Ok);
    }

    #[test]
    fn test_one_sided_ignores_low_outliers() {
        assert_eq!(rules().evaluate(5.0, -2.5, 3), Flag::Ok);
        let two_sided = FlagRules {
            two_sided: true,
            ..rules()
        };
        assert_eq!(two_sided.evaluate(5.0, -2.5, 3), Flag::ZOutlier);
    }
}
