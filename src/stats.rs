//! Population-convention statistics (ddof = 0), matching how the upstream
//! analysis scored every collection it looked at.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// One z-score per input value. Degenerate collections (fewer than two
/// values, or zero spread) score everything 0.0 instead of dividing by zero.
pub fn zscores(values: &[f64]) -> Vec<f64> {
    let sd = std_dev(values);
    if sd == 0.0 {
        return vec![0.0; values.len()];
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) / sd).collect()
}

/// Linear-interpolation percentile over an ascending-sorted slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std_dev() {
        let values = [10.0, 10.0, 10.0, 100.0];
        assert_eq!(mean(&values), 32.5);
        // Population stddev: sqrt(1518.75)
        assert!((std_dev(&values) - 38.97114).abs() < 1e-4);
    }

    #[test]
    fn test_zscores_rank_the_outlier() {
        let z = zscores(&[10.0, 10.0, 10.0, 100.0]);
        assert!(z[3] > z[0]);
        assert!(z[3] > 1.7);
        assert!(z[0] < 0.0);
    }

    #[test]
    fn test_zscores_degenerate_inputs_fall_back_to_zero() {
        assert_eq!(zscores(&[]), Vec::<f64>::new());
        assert_eq!(zscores(&[42.0]), vec![0.0]);
        assert_eq!(zscores(&[7.0, 7.0, 7.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zscores_sum_to_zero() {
        let z = zscores(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(z.iter().sum::<f64>().abs() < 1e-9);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
        assert_eq!(percentile(&sorted, 50.0), 2.5);
        assert!((percentile(&sorted, 33.0) - 1.99).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[9.0], 66.0), 9.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }
}
