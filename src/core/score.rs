//! Score coercion: raw text from a score cell to a finite number.
//!
//! Input is parsed tolerantly. Empty input is 0. Otherwise the longest
//! leading decimal number is used (`"12abc"` is 12) and anything that does
//! not start with a number is 0. The result is always finite.

/// Coerce raw score input into a finite number.
///
/// ```
/// use scorekeeper::core::coerce_score;
///
/// assert_eq!(coerce_score(""), 0.0);
/// assert_eq!(coerce_score("abc"), 0.0);
/// assert_eq!(coerce_score("3.5"), 3.5);
/// assert_eq!(coerce_score("-2"), -2.0);
/// assert_eq!(coerce_score("12abc"), 12.0);
/// ```
#[must_use]
pub fn coerce_score(raw: &str) -> f64 {
    let input = raw.trim_start();
    let prefix = &input[..numeric_prefix_len(input)];

    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Length in bytes of the leading `[+-]?digits[.digits][(e|E)[+-]?digits]` run.
///
/// Returns 0 when the mantissa has no digits at all.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        // A lone "." only counts when digits precede it ("5." is 5).
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_are_zero() {
        assert_eq!(coerce_score(""), 0.0);
        assert_eq!(coerce_score("   "), 0.0);
    }

    #[test]
    fn test_non_numeric_is_zero() {
        for raw in ["abc", ".", "-", "+", "e5", "-.e", "NaN", "Infinity", "inf"] {
            assert_eq!(coerce_score(raw), 0.0, "input {raw:?}");
        }
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(coerce_score("10"), 10.0);
        assert_eq!(coerce_score("3.5"), 3.5);
        assert_eq!(coerce_score("-7"), -7.0);
        assert_eq!(coerce_score("+4"), 4.0);
        assert_eq!(coerce_score(".5"), 0.5);
        assert_eq!(coerce_score("5."), 5.0);
        assert_eq!(coerce_score("  42"), 42.0);
    }

    #[test]
    fn test_exponents() {
        assert_eq!(coerce_score("1e3"), 1000.0);
        assert_eq!(coerce_score("2.5E-1"), 0.25);
        // Dangling exponent marker is ignored.
        assert_eq!(coerce_score("7e"), 7.0);
        assert_eq!(coerce_score("7e+"), 7.0);
    }

    #[test]
    fn test_leading_prefix_wins() {
        assert_eq!(coerce_score("12abc"), 12.0);
        assert_eq!(coerce_score("3.5.1"), 3.5);
        assert_eq!(coerce_score("-1-1"), -1.0);
    }

    #[test]
    fn test_overflow_is_zero() {
        assert_eq!(coerce_score("1e400"), 0.0);
        assert_eq!(coerce_score("-1e400"), 0.0);
    }
}
