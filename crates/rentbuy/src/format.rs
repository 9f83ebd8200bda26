/// Group the integer part of `value` with thousands separators
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\'');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format an amount in whole francs (e.g. `CHF 1'250'000`)
pub fn format_chf(value: f64) -> String {
    let grouped = group_thousands(value.abs().round() as u64);
    if value < 0.0 && grouped != "0" {
        format!("-CHF {grouped}")
    } else {
        format!("CHF {grouped}")
    }
}

/// Format an amount compactly for tight table columns (e.g. 2.1M, 450K, 50)
pub fn format_compact(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000.0 {
        format!("{}{:.2}M", sign, abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{}{:.1}K", sign, abs_value / 1_000.0)
    } else {
        format!("{}{:.0}", sign, abs_value)
    }
}

/// Format a fraction as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_chf() {
        assert_eq!(format_chf(1_250_000.4), "CHF 1'250'000");
        assert_eq!(format_chf(-9_674.6), "-CHF 9'675");
        assert_eq!(format_chf(999.0), "CHF 999");
        assert_eq!(format_chf(-0.2), "CHF 0");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(2_134_000.0), "2.13M");
        assert_eq!(format_compact(-450_000.0), "-450.0K");
        assert_eq!(format_compact(50.0), "50");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.734), "73.4%");
    }
}
