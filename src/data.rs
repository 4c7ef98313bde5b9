use std::sync::OnceLock;

use regex::Regex;

fn accounting_negative() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\(\s*(.*?)\s*\)$").expect("valid accounting pattern"))
}

/// Best-effort numeric coercion for one statement cell.
///
/// Thousands separators are removed and accounting negatives such as
/// `(1,234)` become `-1234`. Anything that still fails to parse, including
/// empty cells and placeholders like `-` or `n/a`, yields `None`.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = trimmed.replace(',', "");
    let candidate = match accounting_negative().captures(&stripped) {
        Some(caps) => format!("-{}", &caps[1]),
        None => stripped,
    };
    candidate
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Integral values print without decimals, everything else with two.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

pub fn format_cell(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

/// Relative change in percent; undefined without both operands or when the
/// base is zero.
pub fn percent_change(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    ratio(current? - previous?, previous?).map(|r| r * 100.0)
}

pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|value| value.is_finite())
}
