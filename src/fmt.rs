/// Format a float as a dollar amount with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

pub fn pct(val: f64) -> String {
    format!("{val:.2}%")
}

pub fn zscore(val: f64) -> String {
    format!("{val:+.2}")
}

/// Proportional block bar for terminal trend charts.
pub fn bar(val: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || val <= 0.0 {
        return String::new();
    }
    let n = ((val / max) * width as f64).round() as usize;
    "█".repeat(n.clamp(1, width))
}
