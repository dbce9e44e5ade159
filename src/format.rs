//! Text rendering for optional measures.
//!
//! Missing values render as [`MISSING_PLACEHOLDER`], never as `0`.

/// Rendered in place of a missing value.
pub const MISSING_PLACEHOLDER: &str = "N/A";

/// Hourly wage with cents: `$48.25`.
pub fn format_hourly(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v:.2}"),
        None => MISSING_PLACEHOLDER.to_string(),
    }
}

/// Annual wage rounded to whole dollars with separators: `$100,360`.
pub fn format_annual(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", group_thousands(&format!("{v:.0}"))),
        None => MISSING_PLACEHOLDER.to_string(),
    }
}

/// Plain metric with separators and two decimals: `3,175,390.00`.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => group_thousands(&format!("{v:.2}")),
        None => MISSING_PLACEHOLDER.to_string(),
    }
}

/// Insert `,` separators into the integer part of an already formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_keeps_cents() {
        assert_eq!(format_hourly(Some(48.254)), "$48.25");
        assert_eq!(format_hourly(None), "N/A");
    }

    #[test]
    fn annual_groups_thousands() {
        assert_eq!(format_annual(Some(100_360.4)), "$100,360");
        assert_eq!(format_annual(Some(999.0)), "$999");
        assert_eq!(format_annual(Some(1_000.0)), "$1,000");
        assert_eq!(format_annual(None), "N/A");
    }

    #[test]
    fn metric_groups_and_keeps_two_decimals() {
        assert_eq!(format_metric(Some(3_175_390.0)), "3,175,390.00");
        assert_eq!(format_metric(Some(1.234)), "1.23");
        assert_eq!(format_metric(Some(-12_345.5)), "-12,345.50");
        assert_eq!(format_metric(None), "N/A");
    }
}
