use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid numeric regex")
});

/// Lenient float coercion for statement cells and stored values.
///
/// Embedded spaces are dropped first (brokers print "1 234.56"), then the longest
/// leading numeric prefix is parsed, so "66624.2 USDT" gives 66624.2.
/// Anything without a numeric prefix, or a non-finite result, gives 0.0.
pub fn coerce_f64(value: &str) -> f64 {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();

    LEADING_NUMBER
        .find(&compact)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(coerce_f64("50"), 50.0);
        assert_eq!(coerce_f64("-12.75"), -12.75);
        assert_eq!(coerce_f64("+0.5"), 0.5);
        assert_eq!(coerce_f64(".25"), 0.25);
        assert_eq!(coerce_f64("1e3"), 1000.0);
    }

    #[test]
    fn test_thousands_separator_and_suffix() {
        assert_eq!(coerce_f64("1 234.56"), 1234.56);
        assert_eq!(coerce_f64(" 2.5 lots"), 2.5);
        assert_eq!(coerce_f64("-90.354USDT"), -90.354);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(coerce_f64(""), 0.0);
        assert_eq!(coerce_f64("--"), 0.0);
        assert_eq!(coerce_f64("Market"), 0.0);
        assert_eq!(coerce_f64("NaN"), 0.0);
        assert_eq!(coerce_f64("1e999"), 0.0);
    }
}
