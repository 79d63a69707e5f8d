//! Number formatting and lenient numeric prefix parsing.

use regex::Regex;

/// Formats a number the way an ECMAScript engine stringifies it (`Number#toString`).
///
/// The command-stream grammar has no float syntax of its own, so the shortest round-trippable
/// decimal is used everywhere. `-0` prints as `0`.
pub fn js(v: f64) -> String {
    let mut buf = ryu_js::Buffer::new();
    if v == 0.0 {
        return "0".to_string();
    }
    buf.format(v).to_string()
}

/// Rounds to 6 decimal places through fixed-precision decimal formatting.
pub fn round6(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    format!("{v:.6}").parse::<f64>().unwrap_or(v)
}

/// `round6` followed by [`js`]: fixed precision with trailing zeros trimmed.
pub fn format_fixed6(v: f64) -> String {
    js(round6(v))
}

fn float_prefix_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid regex")
    })
}

/// Parses the longest numeric prefix of `s` after leading whitespace (`"12px"` → `12`).
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let m = float_prefix_regex().find(s)?;
    m.as_str().parse::<f64>().ok()
}

fn scalar_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[-+]?\d*\.?\d+(e[-+]?\d+)?$").expect("valid regex"))
}

/// Whether `s` is a bare number with nothing else around it.
pub fn is_scalar(s: &str) -> bool {
    scalar_regex().is_match(s.trim())
}

/// Splits an argument list on runs of commas and whitespace, dropping empty pieces.
pub fn split_list(s: &str) -> Vec<&str> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_matches_ecmascript_number_to_string() {
        assert_eq!(js(10.0), "10");
        assert_eq!(js(-0.0), "0");
        assert_eq!(js(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(js(37.79527559055118), "37.79527559055118");
        assert_eq!(js(1e21), "1e+21");
    }

    #[test]
    fn format_fixed6_trims_trailing_zeros() {
        assert_eq!(format_fixed6(0.5), "0.5");
        assert_eq!(format_fixed6(1.0 / 3.0), "0.333333");
        assert_eq!(format_fixed6(0.99999999), "1");
        assert_eq!(format_fixed6(128.0 / 255.0), "0.501961");
    }

    #[test]
    fn parse_float_prefix_is_lenient_like_parse_float() {
        assert_eq!(parse_float_prefix("12px"), Some(12.0));
        assert_eq!(parse_float_prefix("  -.5e1x"), Some(-5.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn split_list_drops_separator_runs() {
        assert_eq!(split_list(" 1, 2  3,,4 "), vec!["1", "2", "3", "4"]);
        assert!(split_list("  ").is_empty());
    }
}
